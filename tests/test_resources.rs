mod common;

use common::TestEnvironment;
use pretty_assertions::assert_eq;
use prixfixe_client::models::{
    QueryFilter, Report, SortDirection, ValidIngredient, ValidInstrument, ValidInstrumentCreationInput,
    ValidPreparation,
};
use prixfixe_client::{Context, ErrorKind};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_get_valid_ingredient() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/valid_ingredients/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&env.server)
        .await;

    let ingredient = env
        .client
        .get::<ValidIngredient>(&Context::background(), [], 1)
        .await
        .unwrap();

    assert_eq!(
        ingredient,
        ValidIngredient {
            id: 1,
            ..Default::default()
        }
    );
}

#[tokio::test]
async fn test_get_missing_resource() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/valid_ingredients/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&env.server)
        .await;

    let err = env
        .client
        .get::<ValidIngredient>(&Context::background(), [], 404)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_with_garbage_body() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/valid_instruments/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&env.server)
        .await;

    let err = env
        .client
        .get::<ValidInstrument>(&Context::background(), [], 2)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_exists() {
    let env = TestEnvironment::new().await;

    Mock::given(method("HEAD"))
        .and(path("/api/v1/valid_preparations/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&env.server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/api/v1/valid_preparations/2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&env.server)
        .await;

    let ctx = Context::background();

    assert!(env.client.exists::<ValidPreparation>(&ctx, [], 1).await.unwrap());
    assert!(!env.client.exists::<ValidPreparation>(&ctx, [], 2).await.unwrap());
}

#[tokio::test]
async fn test_list_sends_filter() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/valid_instruments"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "50"))
        .and(query_param("sortBy", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 2,
            "limit": 50,
            "totalCount": 51,
            "validInstruments": [{"id": 51, "name": "mandoline"}]
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let filter = QueryFilter::default().page(2).limit(50).sort_by(SortDirection::Desc);
    let list = env
        .client
        .list::<ValidInstrument>(&Context::background(), [], Some(&filter))
        .await
        .unwrap();

    assert_eq!(list.pagination.page, 2);
    assert_eq!(list.pagination.total_count, 51);
    assert_eq!(list.valid_instruments.len(), 1);
    assert_eq!(list.valid_instruments[0].name, "mandoline");
}

#[tokio::test]
async fn test_list_without_filter_has_no_query() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reports": []})))
        .mount(&env.server)
        .await;

    let list = env
        .client
        .list::<Report>(&Context::background(), [], None)
        .await
        .unwrap();
    assert!(list.reports.is_empty());

    let received = env.server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), None);
}

#[tokio::test]
async fn test_search() {
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/valid_ingredients/search"))
        .and(query_param("q", "garlic"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "garlic"},
            {"id": 2, "name": "black garlic"}
        ])))
        .expect(1)
        .mount(&env.server)
        .await;

    let found = env
        .client
        .search::<ValidIngredient>(&Context::background(), [], "garlic", 5)
        .await
        .unwrap();

    let names: Vec<_> = found.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["garlic", "black garlic"]);
}

#[tokio::test]
async fn test_create() {
    let env = TestEnvironment::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/valid_instruments"))
        .and(body_json(json!({
            "name": "spatula",
            "variant": "",
            "description": "flat",
            "icon": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 8,
            "name": "spatula",
            "description": "flat",
            "createdOn": 1600000000
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let created = env
        .client
        .create::<ValidInstrument>(
            &Context::background(),
            [],
            &ValidInstrumentCreationInput {
                name: "spatula".to_string(),
                description: "flat".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(created.id, 8);
    assert_eq!(created.created_on, 1_600_000_000);
}

#[tokio::test]
async fn test_update_replaces_value_with_response() {
    let env = TestEnvironment::new().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/valid_instruments/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 8,
            "name": "offset spatula",
            "lastUpdatedOn": 1600000100
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let mut instrument = ValidInstrument {
        id: 8,
        name: "offset spatula".to_string(),
        ..Default::default()
    };

    env.client
        .update(&Context::background(), [], &mut instrument)
        .await
        .unwrap();

    assert_eq!(instrument.last_updated_on, Some(1_600_000_100));

    let received = env.server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["name"], "offset spatula");
}

#[tokio::test]
async fn test_archive() {
    let env = TestEnvironment::new().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/reports/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/reports/4"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&env.server)
        .await;

    let ctx = Context::background();

    env.client.archive::<Report>(&ctx, [], 3).await.unwrap();

    let err = env.client.archive::<Report>(&ctx, [], 4).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_invalid_base_url_fails_every_operation_before_sending() {
    let client = common::invalid_client();
    let ctx = Context::background();

    let err = client.get::<ValidInstrument>(&ctx, [], 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Build);

    let err = client.exists::<ValidInstrument>(&ctx, [], 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Build);

    let err = client.list::<ValidInstrument>(&ctx, [], None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Build);

    let err = client
        .search::<ValidInstrument>(&ctx, [], "pan", 10)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Build);

    let err = client
        .create::<ValidInstrument>(&ctx, [], &ValidInstrumentCreationInput::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Build);

    let mut instrument = ValidInstrument::default();
    let err = client.update(&ctx, [], &mut instrument).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Build);

    let err = client.archive::<ValidInstrument>(&ctx, [], 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Build);
}
