use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::ClientError;

/// 後端可選的資料庫種類，對應路徑的第一段 `/{db_type}/...`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Scylla,
    #[default]
    Postgres,
    Duckdb,
}

impl DatabaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::Scylla => "scylla",
            DatabaseType::Postgres => "postgres",
            DatabaseType::Duckdb => "duckdb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Photo => "photo",
            MediaType::Video => "video",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accept,
    Declined,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accept => "accept",
            ApplicationStatus::Declined => "declined",
        }
    }
}

macro_rules! wire_enum_str {
    ($ty:ident, $name:literal, [$($variant:ident),+]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ClientError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == $ty::$variant.as_str() {
                        return Ok($ty::$variant);
                    }
                )+
                Err(ClientError::validation(format!(
                    "invalid {} '{}', expected one of: {}",
                    $name,
                    s,
                    [$($ty::$variant.as_str()),+].join(", ")
                )))
            }
        }
    };
}

wire_enum_str!(DatabaseType, "database type", [Scylla, Postgres, Duckdb]);
wire_enum_str!(MediaType, "media type", [Photo, Video]);
wire_enum_str!(ApplicationStatus, "application status", [Pending, Accept, Declined]);

// ---------------------------------------------------------------------------
// Response records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
}

/// 活動內嵌的素材需求（種類 + 數量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub media_type: MediaType,
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub organizer_id: i64,
    pub name: String,
    pub requirements: Vec<Requirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRequirements {
    pub id: i64,
    pub campaign_id: i64,
    pub media_type: MediaType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignApplication {
    pub id: i64,
    pub campaign_id: i64,
    pub user_id: i64,
    pub status: ApplicationStatus,
}

// ---------------------------------------------------------------------------
// Create payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationCreate {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignCreate {
    pub organizer_id: i64,
    pub name: String,
    pub requirements: Vec<Requirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRequirementsCreate {
    pub campaign_id: i64,
    pub media_type: MediaType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignApplicationCreate {
    pub campaign_id: i64,
    pub user_id: i64,
    pub status: ApplicationStatus,
}

// ---------------------------------------------------------------------------
// Update payloads: 未設定的欄位不會出現在 JSON body
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<Requirement>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignRequirementsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignApplicationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// id 篩選條件：`None` 與 `Some(0)` 都視為未指定
pub(crate) fn present(id: Option<i64>) -> Option<i64> {
    id.filter(|v| *v != 0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignsQueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
}

impl CampaignsQueryParams {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        present(self.organization_id)
            .map(|id| vec![("organization_id", id.to_string())])
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationsQueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl ApplicationsQueryParams {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = present(self.campaign_id) {
            pairs.push(("campaign_id", id.to_string()));
        }
        if let Some(id) = present(self.user_id) {
            pairs.push(("user_id", id.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_wire_form() {
        assert_eq!(DatabaseType::Duckdb.to_string(), "duckdb");
        assert_eq!("scylla".parse::<DatabaseType>().unwrap(), DatabaseType::Scylla);
        assert_eq!(serde_json::to_value(ApplicationStatus::Accept).unwrap(), json!("accept"));
        assert!("mysql".parse::<DatabaseType>().is_err());
        assert!("Photo".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_update_omits_absent_fields() {
        let update = UserUpdate {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"email": "new@example.com"})
        );
        assert_eq!(
            serde_json::to_value(CampaignApplicationUpdate::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_query_pairs_skip_missing_and_zero() {
        assert!(CampaignsQueryParams::default().to_pairs().is_empty());
        assert!(CampaignsQueryParams { organization_id: Some(0) }.to_pairs().is_empty());
        assert_eq!(
            CampaignsQueryParams { organization_id: Some(4) }.to_pairs(),
            vec![("organization_id", "4".to_string())]
        );

        let params = ApplicationsQueryParams {
            campaign_id: Some(2),
            user_id: Some(9),
        };
        assert_eq!(
            params.to_pairs(),
            vec![("campaign_id", "2".to_string()), ("user_id", "9".to_string())]
        );
        let params = ApplicationsQueryParams {
            campaign_id: None,
            user_id: Some(9),
        };
        assert_eq!(params.to_pairs(), vec![("user_id", "9".to_string())]);
    }
}
