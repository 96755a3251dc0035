use crate::core::records::parse_doctors;
use crate::core::{ConfigProvider, DirectorySource, Doctor};
use crate::utils::error::{FinderError, Result};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::watch;

pub const DEFAULT_ENDPOINT: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Reads the whole directory with a single GET. No auth, no paging.
pub struct HttpDirectorySource {
    client: Client,
    endpoint: String,
}

impl HttpDirectorySource {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl DirectorySource for HttpDirectorySource {
    async fn fetch_all(&self) -> Result<Vec<Doctor>> {
        tracing::debug!("Requesting directory from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        tracing::debug!("Directory response status: {}", response.status());
        if !response.status().is_success() {
            return Err(FinderError::StatusError {
                status: response.status().as_u16(),
            });
        }

        let json_data: serde_json::Value = response.json().await?;
        match json_data {
            serde_json::Value::Array(items) => Ok(parse_doctors(&items)),
            other => Err(FinderError::PayloadError {
                message: format!("expected an array of records, got {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// What the view sees at any moment: the records so far and whether the
/// one fetch is still outstanding.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    pub doctors: Arc<Vec<Doctor>>,
    pub loading: bool,
}

impl DirectorySnapshot {
    fn pending() -> Self {
        Self {
            doctors: Arc::new(Vec::new()),
            loading: true,
        }
    }
}

pub struct Directory;

impl Directory {
    /// Starts the one and only fetch on the current runtime.
    ///
    /// The snapshot reads `loading: true` with no records until the fetch
    /// settles. Success publishes the records; any failure is logged and
    /// publishes an empty list. Either way `loading` ends up `false` and
    /// nothing is retried.
    pub fn spawn<S>(source: S) -> DirectoryHandle
    where
        S: DirectorySource + 'static,
    {
        let (tx, rx) = watch::channel(DirectorySnapshot::pending());

        tokio::spawn(async move {
            let doctors = match source.fetch_all().await {
                Ok(doctors) => {
                    tracing::info!("Loaded {} doctors", doctors.len());
                    doctors
                }
                Err(e) => {
                    tracing::warn!(
                        "Directory load failed, showing no results: {} ({:?})",
                        e,
                        e.category()
                    );
                    Vec::new()
                }
            };

            // receivers may all be gone; nothing left to notify then
            let _ = tx.send(DirectorySnapshot {
                doctors: Arc::new(doctors),
                loading: false,
            });
        });

        DirectoryHandle { rx }
    }
}

#[derive(Clone)]
pub struct DirectoryHandle {
    rx: watch::Receiver<DirectorySnapshot>,
}

impl DirectoryHandle {
    pub fn snapshot(&self) -> DirectorySnapshot {
        self.rx.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.rx.borrow().loading
    }

    /// Waits for the fetch to settle and returns the final snapshot.
    pub async fn ready(&mut self) -> DirectorySnapshot {
        match self.rx.wait_for(|snapshot| !snapshot.loading).await {
            Ok(snapshot) => snapshot.clone(),
            // sender dropped without publishing, e.g. the fetch task panicked
            Err(_) => DirectorySnapshot {
                doctors: Arc::new(Vec::new()),
                loading: false,
            },
        }
    }
}
