use crate::config::cli::{
    ApplicationCommand, CampaignCommand, Command, OrganizationCommand, UserCommand,
};
use crate::core::mutations::{
    CreateApplicationMutation, CreateCampaignMutation, CreateOrganizationMutation,
    CreateUserMutation, Mutation, Update, UpdateApplicationMutation, UpdateCampaignMutation,
    UpdateOrganizationMutation, UpdateUserMutation,
};
use crate::core::queries::{
    ApplicationsQuery, CampaignApplicationsQuery, CampaignsQuery, OrganizationsQuery, Query,
    UsersQuery,
};
use crate::core::query_client::QueryClient;
use crate::domain::model::{
    CampaignApplicationCreate, CampaignApplicationUpdate, CampaignCreate, CampaignUpdate,
    DatabaseType, OrganizationCreate, OrganizationUpdate, UserCreate, UserUpdate,
};
use crate::domain::ports::CampaignApi;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::Value;

/// 將 CLI 子命令轉成查詢或變更並執行，回傳要輸出的 JSON
pub struct CommandRunner<'a> {
    api: &'a dyn CampaignApi,
    client: &'a QueryClient,
    db: DatabaseType,
}

impl<'a> CommandRunner<'a> {
    pub fn new(api: &'a dyn CampaignApi, client: &'a QueryClient, db: DatabaseType) -> Self {
        Self { api, client, db }
    }

    pub async fn run(&self, command: Command) -> Result<Value> {
        let db = self.db;
        match command {
            Command::Users { action } => match action {
                UserCommand::List => self.query(UsersQuery::new(db)).await,
                UserCommand::Create {
                    username,
                    email,
                    password,
                } => {
                    let input = UserCreate {
                        username,
                        email,
                        password,
                    };
                    self.mutate(CreateUserMutation::new(db), input).await
                }
                UserCommand::Update {
                    id,
                    username,
                    email,
                    password,
                } => {
                    let data = UserUpdate {
                        username,
                        email,
                        password,
                    };
                    self.mutate(UpdateUserMutation::new(db), Update::new(id, data)).await
                }
            },
            Command::Organizations { action } => match action {
                OrganizationCommand::List => self.query(OrganizationsQuery::new(db)).await,
                OrganizationCommand::Create { name } => {
                    self.mutate(CreateOrganizationMutation::new(db), OrganizationCreate { name })
                        .await
                }
                OrganizationCommand::Update { id, name } => {
                    let data = OrganizationUpdate { name };
                    self.mutate(UpdateOrganizationMutation::new(db), Update::new(id, data))
                        .await
                }
            },
            Command::Campaigns { action } => match action {
                CampaignCommand::List { organization_id } => {
                    self.query(CampaignsQuery::new(db, organization_id)).await
                }
                CampaignCommand::Create {
                    organizer_id,
                    name,
                    requirements,
                } => {
                    let input = CampaignCreate {
                        organizer_id,
                        name,
                        requirements,
                    };
                    self.mutate(CreateCampaignMutation::new(db), input).await
                }
                CampaignCommand::Update {
                    id,
                    organizer_id,
                    name,
                    requirements,
                } => {
                    // 沒給 --requirement 時不送出 requirements 欄位
                    let data = CampaignUpdate {
                        organizer_id,
                        name,
                        requirements: (!requirements.is_empty()).then_some(requirements),
                    };
                    self.mutate(UpdateCampaignMutation::new(db), Update::new(id, data))
                        .await
                }
                CampaignCommand::Applications { campaign_id } => {
                    self.query(CampaignApplicationsQuery::new(db, campaign_id))
                        .await
                }
            },
            Command::Applications { action } => match action {
                ApplicationCommand::List {
                    campaign_id,
                    user_id,
                } => {
                    self.query(ApplicationsQuery::new(db, campaign_id, user_id))
                        .await
                }
                ApplicationCommand::Create {
                    campaign_id,
                    user_id,
                    status,
                } => {
                    let input = CampaignApplicationCreate {
                        campaign_id,
                        user_id,
                        status,
                    };
                    self.mutate(CreateApplicationMutation::new(db), input).await
                }
                ApplicationCommand::Update {
                    id,
                    campaign_id,
                    user_id,
                    status,
                } => {
                    let data = CampaignApplicationUpdate {
                        campaign_id,
                        user_id,
                        status,
                    };
                    self.mutate(UpdateApplicationMutation::new(db), Update::new(id, data))
                        .await
                }
            },
        }
    }

    async fn query<Q>(&self, query: Q) -> Result<Value>
    where
        Q: Query,
        Q::Output: Serialize,
    {
        let outcome = self.client.fetch_query(self.api, &query).await?;
        match outcome.into_data() {
            Some(data) => Ok(serde_json::to_value(&*data)?),
            None => Ok(Value::Null),
        }
    }

    async fn mutate<M>(&self, mutation: M, input: M::Input) -> Result<Value>
    where
        M: Mutation,
        M::Output: Serialize,
    {
        let output = self.client.mutate(self.api, &mutation, input).await?;
        Ok(serde_json::to_value(&output)?)
    }
}
