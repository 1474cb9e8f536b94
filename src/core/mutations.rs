use crate::core::queries::keys;
use crate::core::query_key::QueryKey;
use crate::domain::model::{
    Campaign, CampaignApplication, CampaignApplicationCreate, CampaignApplicationUpdate,
    CampaignCreate, CampaignUpdate, DatabaseType, Organization, OrganizationCreate,
    OrganizationUpdate, User, UserCreate, UserUpdate,
};
use crate::domain::ports::CampaignApi;
use crate::utils::error::Result;
use async_trait::async_trait;

/// A write plus the query-key prefixes it makes stale on success.
#[async_trait]
pub trait Mutation: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;

    fn invalidates(&self) -> Vec<QueryKey>;

    async fn mutate(&self, api: &dyn CampaignApi, input: Self::Input) -> Result<Self::Output>;
}

/// 更新請求的輸入：目標 id 與部分欄位
#[derive(Debug, Clone, PartialEq)]
pub struct Update<T> {
    pub id: i64,
    pub data: T,
}

impl<T> Update<T> {
    pub fn new(id: i64, data: T) -> Self {
        Self { id, data }
    }
}

macro_rules! mutation {
    ($name:ident, $input:ty, $output:ty, [$($key:path),+], |$api:ident, $db:ident, $arg:ident| $body:expr) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name {
            pub db: DatabaseType,
        }

        impl $name {
            pub fn new(db: DatabaseType) -> Self {
                Self { db }
            }
        }

        #[async_trait]
        impl Mutation for $name {
            type Input = $input;
            type Output = $output;

            fn invalidates(&self) -> Vec<QueryKey> {
                vec![$($key(self.db)),+]
            }

            async fn mutate(&self, $api: &dyn CampaignApi, $arg: Self::Input) -> Result<Self::Output> {
                let $db = self.db;
                $body.await
            }
        }
    };
}

mutation!(CreateUserMutation, UserCreate, User, [keys::users],
    |api, db, input| api.create_user(db, &input));

mutation!(CreateOrganizationMutation, OrganizationCreate, Organization, [keys::organizations],
    |api, db, input| api.create_organization(db, &input));

mutation!(CreateCampaignMutation, CampaignCreate, Campaign, [keys::campaigns],
    |api, db, input| api.create_campaign(db, &input));

mutation!(CreateApplicationMutation, CampaignApplicationCreate, CampaignApplication,
    [keys::campaign_applications, keys::applications],
    |api, db, input| api.create_application(db, &input));

mutation!(UpdateUserMutation, Update<UserUpdate>, User, [keys::users],
    |api, db, input| api.update_user(db, input.id, &input.data));

mutation!(UpdateOrganizationMutation, Update<OrganizationUpdate>, Organization,
    [keys::organizations],
    |api, db, input| api.update_organization(db, input.id, &input.data));

mutation!(UpdateCampaignMutation, Update<CampaignUpdate>, Campaign, [keys::campaigns],
    |api, db, input| api.update_campaign(db, input.id, &input.data));

mutation!(UpdateApplicationMutation, Update<CampaignApplicationUpdate>, CampaignApplication,
    [keys::campaign_applications, keys::applications],
    |api, db, input| api.update_application(db, input.id, &input.data));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::queries::{
        ApplicationsQuery, CampaignApplicationsQuery, CampaignsQuery, OrganizationsQuery, Query,
        UsersQuery,
    };

    fn covers(prefixes: Vec<QueryKey>, query_key: QueryKey) -> bool {
        prefixes.iter().any(|prefix| query_key.starts_with(prefix))
    }

    #[test]
    fn test_invalidation_keys_match_query_keys() {
        let db = DatabaseType::Postgres;

        let m = CreateUserMutation::new(db);
        assert!(covers(m.invalidates(), UsersQuery::new(db).key()));
        let m = UpdateUserMutation::new(db);
        assert!(covers(m.invalidates(), UsersQuery::new(db).key()));

        let m = CreateOrganizationMutation::new(db);
        assert!(covers(m.invalidates(), OrganizationsQuery::new(db).key()));
        let m = UpdateOrganizationMutation::new(db);
        assert!(covers(m.invalidates(), OrganizationsQuery::new(db).key()));

        for org in [None, Some(5)] {
            let m = CreateCampaignMutation::new(db);
            assert!(covers(m.invalidates(), CampaignsQuery::new(db, org).key()));
            let m = UpdateCampaignMutation::new(db);
            assert!(covers(m.invalidates(), CampaignsQuery::new(db, org).key()));
        }

        let m = CreateApplicationMutation::new(db);
        assert!(covers(m.invalidates(), CampaignApplicationsQuery::new(db, 2).key()));
        assert!(covers(m.invalidates(), ApplicationsQuery::new(db, Some(2), None).key()));
        let m = UpdateApplicationMutation::new(db);
        assert!(covers(m.invalidates(), CampaignApplicationsQuery::new(db, 2).key()));
        assert!(covers(m.invalidates(), ApplicationsQuery::new(db, None, Some(8)).key()));
    }

    #[test]
    fn test_invalidation_is_scoped_to_backend_and_entity() {
        let m = CreateUserMutation::new(DatabaseType::Postgres);
        assert!(!covers(m.invalidates(), UsersQuery::new(DatabaseType::Duckdb).key()));
        assert!(!covers(m.invalidates(), OrganizationsQuery::new(DatabaseType::Postgres).key()));
    }
}
