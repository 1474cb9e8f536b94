use crate::core::query_key::QueryKey;
use crate::domain::model::{
    present, ApplicationsQueryParams, Campaign, CampaignApplication, CampaignsQueryParams,
    DatabaseType, Organization, User,
};
use crate::domain::ports::CampaignApi;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 查詢鍵前綴；查詢與變更共用，確保失效範圍與查詢鍵一致
pub mod keys {
    use super::*;

    pub fn users(db: DatabaseType) -> QueryKey {
        QueryKey::new("users").with(db)
    }

    pub fn organizations(db: DatabaseType) -> QueryKey {
        QueryKey::new("organizations").with(db)
    }

    pub fn campaigns(db: DatabaseType) -> QueryKey {
        QueryKey::new("campaigns").with(db)
    }

    pub fn campaign_applications(db: DatabaseType) -> QueryKey {
        QueryKey::new("campaignApplications").with(db)
    }

    pub fn applications(db: DatabaseType) -> QueryKey {
        QueryKey::new("applications").with(db)
    }
}

/// A cacheable read: a composite key plus the fetch that fills it.
#[async_trait]
pub trait Query: Send + Sync {
    type Output: Send + Sync + 'static;

    fn key(&self) -> QueryKey;

    /// Disabled queries never reach the network.
    fn enabled(&self) -> bool {
        true
    }

    async fn fetch(&self, api: &dyn CampaignApi) -> Result<Self::Output>;
}

#[derive(Debug, Clone, Copy)]
pub struct UsersQuery {
    pub db: DatabaseType,
    pub enabled: bool,
}

impl UsersQuery {
    pub fn new(db: DatabaseType) -> Self {
        Self { db, enabled: true }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[async_trait]
impl Query for UsersQuery {
    type Output = Vec<User>;

    fn key(&self) -> QueryKey {
        keys::users(self.db)
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn fetch(&self, api: &dyn CampaignApi) -> Result<Self::Output> {
        api.get_users(self.db).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrganizationsQuery {
    pub db: DatabaseType,
    pub enabled: bool,
}

impl OrganizationsQuery {
    pub fn new(db: DatabaseType) -> Self {
        Self { db, enabled: true }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[async_trait]
impl Query for OrganizationsQuery {
    type Output = Vec<Organization>;

    fn key(&self) -> QueryKey {
        keys::organizations(self.db)
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn fetch(&self, api: &dyn CampaignApi) -> Result<Self::Output> {
        api.get_organizations(self.db).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CampaignsQuery {
    pub db: DatabaseType,
    pub organization_id: Option<i64>,
    pub enabled: bool,
}

impl CampaignsQuery {
    pub fn new(db: DatabaseType, organization_id: Option<i64>) -> Self {
        Self {
            db,
            organization_id,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[async_trait]
impl Query for CampaignsQuery {
    type Output = Vec<Campaign>;

    fn key(&self) -> QueryKey {
        keys::campaigns(self.db).with(present(self.organization_id))
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn fetch(&self, api: &dyn CampaignApi) -> Result<Self::Output> {
        let params = CampaignsQueryParams {
            organization_id: self.organization_id,
        };
        api.get_campaigns(self.db, params).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CampaignApplicationsQuery {
    pub db: DatabaseType,
    pub campaign_id: i64,
    pub enabled: bool,
}

impl CampaignApplicationsQuery {
    pub fn new(db: DatabaseType, campaign_id: i64) -> Self {
        Self {
            db,
            campaign_id,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[async_trait]
impl Query for CampaignApplicationsQuery {
    type Output = Vec<CampaignApplication>;

    fn key(&self) -> QueryKey {
        keys::campaign_applications(self.db).with(self.campaign_id)
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn fetch(&self, api: &dyn CampaignApi) -> Result<Self::Output> {
        api.get_campaign_applications(self.db, self.campaign_id).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ApplicationsQuery {
    pub db: DatabaseType,
    pub campaign_id: Option<i64>,
    pub user_id: Option<i64>,
    pub enabled: bool,
}

impl ApplicationsQuery {
    pub fn new(db: DatabaseType, campaign_id: Option<i64>, user_id: Option<i64>) -> Self {
        Self {
            db,
            campaign_id,
            user_id,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[async_trait]
impl Query for ApplicationsQuery {
    type Output = Vec<CampaignApplication>;

    fn key(&self) -> QueryKey {
        keys::applications(self.db)
            .with(present(self.campaign_id))
            .with(present(self.user_id))
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn fetch(&self, api: &dyn CampaignApi) -> Result<Self::Output> {
        let params = ApplicationsQueryParams {
            campaign_id: self.campaign_id,
            user_id: self.user_id,
        };
        api.get_applications(self.db, params).await
    }
}
