use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use heroes_api::{create_app, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    create_app(Arc::new(MemoryStore::new()), &[])
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_city(app: &Router, name: &str, capital: &str) -> Value {
    let (status, city) = send(
        app,
        Method::POST,
        "/cities/",
        Some(json!({"name": name, "capital_city": capital})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", city);
    city
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_city_patches_do_not_revert_each_other() {
    let app = app();
    let city = create_city(&app, "A", "B").await;
    let id = city["id"].as_i64().unwrap();

    let (status, patched) = send(
        &app,
        Method::PATCH,
        &format!("/cities/{}/name", id),
        Some(json!({"name": "A2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["capital_city"], "B");

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/cities/{}/capital", id),
        Some(json!({"capital_city": "B2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, city) = send(&app, Method::GET, &format!("/cities/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(city, json!({"id": id, "name": "A2", "capital_city": "B2"}));
}

#[tokio::test]
async fn test_missing_city_echoes_id() {
    let (status, body) = send(&app(), Method::GET, "/cities/31337", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("31337"));
}

#[tokio::test]
async fn test_patch_missing_city() {
    let (status, body) = send(
        &app(),
        Method::PATCH,
        "/cities/8/capital",
        Some(json!({"capital_city": "Nowhere"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "City with ID = 8 was not found");
}

#[tokio::test]
async fn test_delete_city_twice() {
    let app = app();
    let city = create_city(&app, "Norway", "Oslo").await;
    let uri = format!("/cities/{}", city["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_city_name_conflicts() {
    let app = app();
    create_city(&app, "Norway", "Oslo").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/cities/",
        Some(json!({"name": "Norway", "capital_city": "Bergen"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].as_str().unwrap().contains("Norway"));

    let (_, cities) = send(&app, Method::GET, "/cities/", None).await;
    assert_eq!(cities.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_city_search() {
    let app = app();
    create_city(&app, "Norway", "Oslo").await;
    create_city(&app, "Sweden", "Stockholm").await;

    let (status, found) = send(&app, Method::GET, "/cities/?query=Sweden", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(found.is_object());
    assert_eq!(found["capital_city"], "Stockholm");

    let (status, body) = send(&app, Method::GET, "/cities/?query=Denmark", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("Denmark"));

    let (status, _) = send(&app, Method::GET, "/cities/?query=No", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, all) = send(&app, Method::GET, "/cities", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_input_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/cities/", Some(json!({"name": "Solo"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    let long = "x".repeat(51);
    let (status, body) = send(
        &app,
        Method::POST,
        "/cities/",
        Some(json!({"name": long, "capital_city": "Oslo"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().starts_with("name"));

    let (status, _) = send(&app, Method::GET, "/cities/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_hero_with_unknown_team_fails() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/heroes/",
        Some(json!({"name": "Deadpond", "secret_name": "Dive Wilson", "team_id": 99})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("99"));

    let (_, heroes) = send(&app, Method::GET, "/heroes/", None).await;
    assert!(heroes.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_hero_show_team_toggle() {
    let app = app();
    let (_, team) = send(
        &app,
        Method::POST,
        "/teams/",
        Some(json!({"name": "Preventers", "headquarters": "Sharp Tower"})),
    )
    .await;
    let (status, hero) = send(
        &app,
        Method::POST,
        "/heroes/",
        Some(json!({"name": "Rusty-Man", "secret_name": "Tommy Sharp", "age": 48, "team_id": team["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let hero_id = hero["id"].as_i64().unwrap();

    let (status, with_team) = send(
        &app,
        Method::GET,
        &format!("/heroes/{}/teams?show_team=true", hero_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(with_team["team"], team);
    assert_eq!(with_team["name"], "Rusty-Man");

    let (status, plain) = send(
        &app,
        Method::GET,
        &format!("/heroes/{}/teams?show_team=false", hero_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(plain.get("team").is_none());
    assert_eq!(plain["age"], 48);

    let (status, _) = send(&app, Method::GET, "/heroes/777/teams?show_team=true", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hero_defaults_and_search() {
    let app = app();
    let (_, hero) = send(
        &app,
        Method::POST,
        "/heroes",
        Some(json!({"name": "Spider-Boy", "secret_name": "Pedro Parqueador"})),
    )
    .await;
    assert_eq!(hero["age"], 1);
    assert_eq!(hero["team_id"], Value::Null);

    let (status, found) = send(&app, Method::GET, "/heroes/?query=Spider-Boy", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["id"], hero["id"]);

    let (status, _) = send(&app, Method::GET, "/heroes/?query=S", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/heroes/{}", hero["id"]);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains(&hero["id"].to_string()));
}

#[tokio::test]
async fn test_team_round_trip_and_update() {
    let app = app();
    let submitted = json!({"name": "Z-Force", "headquarters": "Sister Margaret's Bar"});
    let (status, created) = send(&app, Method::POST, "/teams/", Some(submitted.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/teams/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], submitted["name"]);
    assert_eq!(fetched["headquarters"], submitted["headquarters"]);
    assert_eq!(fetched["id"], id);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/teams/{}", id),
        Some(json!({"headquarters": "Pier 4"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Z-Force");
    assert_eq!(updated["headquarters"], "Pier 4");

    let (status, _) = send(&app, Method::PUT, "/teams/404", Some(json!({"name": "Ghosts"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_team_heroes_and_delete() {
    let app = app();
    let (_, team) = send(
        &app,
        Method::POST,
        "/teams/",
        Some(json!({"name": "Preventers", "headquarters": "Sharp Tower"})),
    )
    .await;
    for name in ["Rusty-Man", "Tarantula"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/heroes/",
            Some(json!({"name": name, "secret_name": "?", "team_id": team["id"]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let uri = format!("/teams/{}", team["id"]);
    let (status, read) = send(&app, Method::GET, &format!("{}/heroes", uri), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["heroes"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, heroes) = send(&app, Method::GET, "/heroes/", None).await;
    for hero in heroes.as_array().unwrap() {
        assert_eq!(hero["team_id"], Value::Null);
    }
}

#[tokio::test]
async fn test_concurrent_team_creates_with_same_name() {
    let app = app();
    let body = json!({"name": "Avengers", "headquarters": "Tower"});

    let (first, second) = tokio::join!(
        send(&app, Method::POST, "/teams/", Some(body.clone())),
        send(&app, Method::POST, "/teams/", Some(body.clone())),
    );
    let mut statuses = vec![first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    let (_, teams) = send(&app, Method::GET, "/teams/", None).await;
    assert_eq!(teams.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_city_patch_into_taken_values_conflicts() {
    let app = app();
    create_city(&app, "Norway", "Oslo").await;
    let sweden = create_city(&app, "Sweden", "Stockholm").await;
    let id = sweden["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/cities/{}/name", id),
        Some(json!({"name": "Norway"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].as_str().unwrap().contains("Norway"));

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/cities/{}/capital", id),
        Some(json!({"capital_city": "Oslo"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].as_str().unwrap().contains("Oslo"));

    let (status, stored) = send(&app, Method::GET, &format!("/cities/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored, sweden);
}

#[tokio::test]
async fn test_team_rename_into_taken_name_conflicts() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/teams/",
        Some(json!({"name": "Preventers", "headquarters": "Sharp Tower"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, z_force) = send(
        &app,
        Method::POST,
        "/teams/",
        Some(json!({"name": "Z-Force", "headquarters": "Sister Margaret's Bar"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/teams/{}", z_force["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"name": "Preventers", "headquarters": "Pier 4"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].as_str().unwrap().contains("Preventers"));

    let (status, stored) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored, z_force);
}
