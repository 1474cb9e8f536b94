use crate::core::schema::{parse, parse_list};
use crate::domain::model::{
    ApplicationsQueryParams, Campaign, CampaignApplication, CampaignApplicationCreate,
    CampaignApplicationUpdate, CampaignCreate, CampaignUpdate, CampaignsQueryParams,
    DatabaseType, Organization, OrganizationCreate, OrganizationUpdate, User, UserCreate,
    UserUpdate,
};
use crate::domain::ports::{CampaignApi, ConfigProvider};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;

/// reqwest 實作的 REST 介面
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        validate_url("client.base_url", config.base_url())?;

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 送出請求並回傳尚未驗證的 JSON；非 2xx 一律視為 TransportError
    async fn request<B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("📡 {} {} {:?}", method, url, query);

        let mut request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 Response status: {}", status);

        if !status.is_success() {
            return Err(ClientError::TransportError {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get(&self, path: &str, query: &[(&'static str, String)]) -> Result<Value> {
        self.request::<Value>(Method::GET, path, query, None).await
    }

    async fn send<B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value> {
        self.request(method, path, &[], Some(body)).await
    }
}

#[async_trait]
impl CampaignApi for HttpApi {
    async fn get_users(&self, db: DatabaseType) -> Result<Vec<User>> {
        parse_list(self.get(&format!("/{}/users", db), &[]).await?)
    }

    async fn get_organizations(&self, db: DatabaseType) -> Result<Vec<Organization>> {
        parse_list(self.get(&format!("/{}/organizations", db), &[]).await?)
    }

    async fn get_campaigns(
        &self,
        db: DatabaseType,
        params: CampaignsQueryParams,
    ) -> Result<Vec<Campaign>> {
        let query = params.to_pairs();
        parse_list(self.get(&format!("/{}/campaigns", db), &query).await?)
    }

    async fn get_campaign_applications(
        &self,
        db: DatabaseType,
        campaign_id: i64,
    ) -> Result<Vec<CampaignApplication>> {
        let path = format!("/{}/campaigns/{}/applications", db, campaign_id);
        parse_list(self.get(&path, &[]).await?)
    }

    async fn get_applications(
        &self,
        db: DatabaseType,
        params: ApplicationsQueryParams,
    ) -> Result<Vec<CampaignApplication>> {
        let query = params.to_pairs();
        parse_list(self.get(&format!("/{}/applications", db), &query).await?)
    }

    async fn create_user(&self, db: DatabaseType, data: &UserCreate) -> Result<User> {
        parse(self.send(Method::POST, &format!("/{}/users", db), data).await?)
    }

    async fn create_organization(
        &self,
        db: DatabaseType,
        data: &OrganizationCreate,
    ) -> Result<Organization> {
        parse(self.send(Method::POST, &format!("/{}/organizations", db), data).await?)
    }

    async fn create_campaign(&self, db: DatabaseType, data: &CampaignCreate) -> Result<Campaign> {
        parse(self.send(Method::POST, &format!("/{}/campaigns", db), data).await?)
    }

    async fn create_application(
        &self,
        db: DatabaseType,
        data: &CampaignApplicationCreate,
    ) -> Result<CampaignApplication> {
        parse(self.send(Method::POST, &format!("/{}/applications", db), data).await?)
    }

    async fn update_user(
        &self,
        db: DatabaseType,
        user_id: i64,
        data: &UserUpdate,
    ) -> Result<User> {
        let path = format!("/{}/users/{}", db, user_id);
        parse(self.send(Method::PUT, &path, data).await?)
    }

    async fn update_organization(
        &self,
        db: DatabaseType,
        organization_id: i64,
        data: &OrganizationUpdate,
    ) -> Result<Organization> {
        let path = format!("/{}/organizations/{}", db, organization_id);
        parse(self.send(Method::PUT, &path, data).await?)
    }

    async fn update_campaign(
        &self,
        db: DatabaseType,
        campaign_id: i64,
        data: &CampaignUpdate,
    ) -> Result<Campaign> {
        let path = format!("/{}/campaigns/{}", db, campaign_id);
        parse(self.send(Method::PUT, &path, data).await?)
    }

    async fn update_application(
        &self,
        db: DatabaseType,
        application_id: i64,
        data: &CampaignApplicationUpdate,
    ) -> Result<CampaignApplication> {
        let path = format!("/{}/applications/{}", db, application_id);
        parse(self.send(Method::PUT, &path, data).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..Default::default()
        };
        let api = HttpApi::new(&config).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ClientConfig {
            base_url: "ftp://localhost".to_string(),
            ..Default::default()
        };
        let err = HttpApi::new(&config).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfigValueError { .. }));
    }
}
