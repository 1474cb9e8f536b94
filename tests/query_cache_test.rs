use asm3_client::core::mutations::{
    CreateApplicationMutation, CreateOrganizationMutation, Update, UpdateUserMutation,
};
use asm3_client::core::queries::{
    ApplicationsQuery, CampaignApplicationsQuery, OrganizationsQuery, Query, UsersQuery,
};
use asm3_client::domain::model::*;
use asm3_client::{ClientConfig, HttpApi, QueryClient, QueryOutcome};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn api_for(server: &MockServer) -> HttpApi {
    let config = ClientConfig {
        base_url: server.base_url(),
        ..Default::default()
    };
    HttpApi::new(&config).unwrap()
}

#[tokio::test]
async fn test_cached_query_issues_single_request() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/postgres/organizations");
            then.status(200).json_body(json!([{"id": 1, "name": "Acme"}]));
        })
        .await;

    let api = api_for(&server);
    let client = QueryClient::new(Duration::from_secs(60));
    let query = OrganizationsQuery::new(DatabaseType::Postgres);

    let first = client.fetch_query(&api, &query).await?;
    let second = client.fetch_query(&api, &query).await?;

    assert!(matches!(first, QueryOutcome::Fetched(_)));
    assert!(second.is_cached());
    assert_eq!(second.data().unwrap()[0].name, "Acme");
    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_different_backends_are_cached_separately() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let postgres = server
        .mock_async(|when, then| {
            when.method(GET).path("/postgres/users");
            then.status(200).json_body(json!([]));
        })
        .await;
    let scylla = server
        .mock_async(|when, then| {
            when.method(GET).path("/scylla/users");
            then.status(200)
                .json_body(json!([{"id": 1, "username": "ann", "email": "a@x"}]));
        })
        .await;

    let api = api_for(&server);
    let client = QueryClient::default();

    let pg = client
        .fetch_query(&api, &UsersQuery::new(DatabaseType::Postgres))
        .await?;
    let sc = client
        .fetch_query(&api, &UsersQuery::new(DatabaseType::Scylla))
        .await?;

    assert!(pg.data().unwrap().is_empty());
    assert_eq!(sc.data().unwrap().len(), 1);
    postgres.assert_hits_async(1).await;
    scylla.assert_hits_async(1).await;
    assert_eq!(client.len().await, 2);
    Ok(())
}

#[tokio::test]
async fn test_mutation_triggers_refetch_of_invalidated_query() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/postgres/organizations");
            then.status(200).json_body(json!([{"id": 1, "name": "Acme"}]));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/postgres/organizations")
                .json_body(json!({"name": "Globex"}));
            then.status(200).json_body(json!({"id": 2, "name": "Globex"}));
        })
        .await;

    let api = api_for(&server);
    let client = QueryClient::default();
    let db = DatabaseType::Postgres;
    let query = OrganizationsQuery::new(db);

    client.fetch_query(&api, &query).await?;
    let created = client
        .mutate(
            &api,
            &CreateOrganizationMutation::new(db),
            OrganizationCreate {
                name: "Globex".to_string(),
            },
        )
        .await?;
    assert_eq!(created.id, 2);

    let refreshed = client.fetch_query(&api, &query).await?;
    assert!(matches!(refreshed, QueryOutcome::Fetched(_)));
    create.assert_hits_async(1).await;
    list.assert_hits_async(2).await;
    Ok(())
}

#[tokio::test]
async fn test_application_mutation_invalidates_both_application_views() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/duckdb/campaigns/3/applications");
            then.status(200).json_body(json!([]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/duckdb/applications");
            then.status(200).json_body(json!([]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/duckdb/applications");
            then.status(200).json_body(json!({
                "id": 1, "campaign_id": 3, "user_id": 4, "status": "pending"
            }));
        })
        .await;

    let api = api_for(&server);
    let client = QueryClient::default();
    let db = DatabaseType::Duckdb;
    let per_campaign = CampaignApplicationsQuery::new(db, 3);
    let per_user = ApplicationsQuery::new(db, None, Some(4));
    let users = UsersQuery::new(db);

    client.fetch_query(&api, &per_campaign).await?;
    client.fetch_query(&api, &per_user).await?;
    client.set_query_data(users.key(), Vec::<User>::new()).await;

    client
        .mutate(
            &api,
            &CreateApplicationMutation::new(db),
            CampaignApplicationCreate {
                campaign_id: 3,
                user_id: 4,
                status: ApplicationStatus::Pending,
            },
        )
        .await?;

    assert_eq!(client.is_stale(&per_campaign.key()).await, Some(true));
    assert_eq!(client.is_stale(&per_user.key()).await, Some(true));
    assert_eq!(client.is_stale(&users.key()).await, Some(false));
    Ok(())
}

#[tokio::test]
async fn test_failed_mutation_propagates_and_keeps_cache() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/postgres/users");
            then.status(200)
                .json_body(json!([{"id": 1, "username": "ann", "email": "a@x"}]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/postgres/users/42");
            then.status(404);
        })
        .await;

    let api = api_for(&server);
    let client = QueryClient::default();
    let db = DatabaseType::Postgres;

    client.fetch_query(&api, &UsersQuery::new(db)).await?;
    let result = client
        .mutate(
            &api,
            &UpdateUserMutation::new(db),
            Update::new(
                42,
                UserUpdate {
                    username: Some("ghost".to_string()),
                    ..Default::default()
                },
            ),
        )
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "API request failed: 404 Not Found");

    let again = client.fetch_query(&api, &UsersQuery::new(db)).await?;
    assert!(again.is_cached());
    list.assert_hits_async(1).await;
    Ok(())
}
