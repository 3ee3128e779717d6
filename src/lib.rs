pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{toml_config::TomlConfig, Settings};

pub use adapters::http::ReqwestFetch;
pub use crate::core::api::{init, MegaApi};
pub use domain::model::{ApiValue, RequestOptions};
pub use utils::error::{ApiError, Result};
