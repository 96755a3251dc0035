pub mod directory;
pub mod engine;
pub mod query;
pub mod records;

pub use crate::domain::model::{ConsultMode, Doctor, FilterSpec, SortKey};
pub use crate::domain::ports::{ConfigProvider, DirectorySource};
pub use crate::utils::error::Result;
