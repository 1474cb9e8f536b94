use crate::domain::model::{
    ApplicationsQueryParams, Campaign, CampaignApplication, CampaignApplicationCreate,
    CampaignApplicationUpdate, CampaignCreate, CampaignUpdate, CampaignsQueryParams,
    DatabaseType, Organization, OrganizationCreate, OrganizationUpdate, User, UserCreate,
    UserUpdate,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn db_type(&self) -> DatabaseType;
    fn timeout(&self) -> Duration;
    fn stale_time(&self) -> Duration;
}

/// 後端 CRUD 介面；查詢與變更層只依賴這個 trait
#[async_trait]
pub trait CampaignApi: Send + Sync {
    async fn get_users(&self, db: DatabaseType) -> Result<Vec<User>>;
    async fn get_organizations(&self, db: DatabaseType) -> Result<Vec<Organization>>;
    async fn get_campaigns(
        &self,
        db: DatabaseType,
        params: CampaignsQueryParams,
    ) -> Result<Vec<Campaign>>;
    async fn get_campaign_applications(
        &self,
        db: DatabaseType,
        campaign_id: i64,
    ) -> Result<Vec<CampaignApplication>>;
    async fn get_applications(
        &self,
        db: DatabaseType,
        params: ApplicationsQueryParams,
    ) -> Result<Vec<CampaignApplication>>;

    async fn create_user(&self, db: DatabaseType, data: &UserCreate) -> Result<User>;
    async fn create_organization(
        &self,
        db: DatabaseType,
        data: &OrganizationCreate,
    ) -> Result<Organization>;
    async fn create_campaign(&self, db: DatabaseType, data: &CampaignCreate) -> Result<Campaign>;
    async fn create_application(
        &self,
        db: DatabaseType,
        data: &CampaignApplicationCreate,
    ) -> Result<CampaignApplication>;

    async fn update_user(&self, db: DatabaseType, user_id: i64, data: &UserUpdate)
        -> Result<User>;
    async fn update_organization(
        &self,
        db: DatabaseType,
        organization_id: i64,
        data: &OrganizationUpdate,
    ) -> Result<Organization>;
    async fn update_campaign(
        &self,
        db: DatabaseType,
        campaign_id: i64,
        data: &CampaignUpdate,
    ) -> Result<Campaign>;
    async fn update_application(
        &self,
        db: DatabaseType,
        application_id: i64,
        data: &CampaignApplicationUpdate,
    ) -> Result<CampaignApplication>;
}
