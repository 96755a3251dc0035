use crate::domain::model::Doctor;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Where the full directory comes from. One call returns the whole collection.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Doctor>>;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}
