pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{toml_config::TomlConfig, Settings};

pub use app::{render::OutputFormat, session::FilterSession};
pub use crate::core::directory::{Directory, DirectoryHandle, DirectorySnapshot, HttpDirectorySource};
pub use crate::core::engine::{active_filter_count, all_specialties, derive_view, suggestions};
pub use crate::core::query::{decode, encode};
pub use crate::core::{ConsultMode, Doctor, FilterSpec, SortKey};
pub use utils::error::{FinderError, Result};
