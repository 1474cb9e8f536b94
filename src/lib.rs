pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use app::CommandRunner;
#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::HttpApi;
pub use config::ClientConfig;
pub use core::query_client::{QueryClient, QueryOutcome};
pub use core::query_key::QueryKey;
pub use domain::model::DatabaseType;
pub use domain::ports::{CampaignApi, ConfigProvider};
pub use utils::error::{ClientError, Result};
