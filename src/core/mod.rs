pub mod mutations;
pub mod queries;
pub mod query_client;
pub mod query_key;
pub mod schema;

pub use crate::domain::ports::{CampaignApi, ConfigProvider};
pub use crate::utils::error::Result;
