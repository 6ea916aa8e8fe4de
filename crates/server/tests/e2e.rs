use std::net::SocketAddr;

use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes;
use server::state::ServerState;
use service::resource_service::ResourceService;
use service::storage::document::DocumentStore;

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

// Every resource rides the document store here so the whole HTTP contract
// is exercised without a database.
async fn start_server() -> anyhow::Result<TestApp> {
    let dir = std::env::temp_dir().join(format!("answer_api_e2e_{}", Uuid::new_v4()));
    let comments = DocumentStore::new(dir.join("comments.json")).await?;
    let users = DocumentStore::new(dir.join("users.json")).await?;
    let departments = DocumentStore::new(dir.join("departments.json")).await?;

    let state = ServerState {
        comments: ResourceService::new(comments),
        users: ResourceService::new(users),
        departments: ResourceService::new(departments),
    };

    let app: Router = routes::build_router(cors(), state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_comment_crud_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Insert -> 201 with store-assigned id, version 0, equal timestamps.
    let res = c
        .post(format!("{}/api/comment", app.base_url))
        .json(&json!({"role": "user", "content": "hi"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let location = res
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_str().expect("assigned id").to_owned();
    assert!(!id.is_empty());
    assert_eq!(created["version"], 0);
    assert_eq!(created["role"], "user");
    assert_eq!(created["content"], "hi");
    assert_eq!(created["createdAt"], created["updatedAt"]);
    assert_eq!(location.as_deref(), Some(format!("/api/comment/{}", id).as_str()));

    // Update same id -> 200, version 1, content replaced, id unchanged.
    let res = c
        .put(format!("{}/api/comment/{}", app.base_url, id))
        .json(&json!({"role": "user", "content": "bye"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["version"], 1);
    assert_eq!(updated["content"], "bye");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    // Get a nonexistent id -> 404 with a message body.
    let res = c
        .get(format!("{}/api/comment/{}", app.base_url, Uuid::new_v4()))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["message"].as_str().is_some());

    // List -> count 1 with our comment.
    let res = c.get(format!("{}/api/comment", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let index = res.json::<serde_json::Value>().await?;
    assert_eq!(index["count"], 1);
    assert_eq!(index["items"][0]["id"], id.as_str());

    // Delete -> 204, repeated delete is still 204, list shrinks.
    let res = c.delete(format!("{}/api/comment/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::NO_CONTENT);
    let res = c.delete(format!("{}/api/comment/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::NO_CONTENT);

    let res = c.get(format!("{}/api/comment", app.base_url)).send().await?;
    let index = res.json::<serde_json::Value>().await?;
    assert_eq!(index["count"], 0);
    assert!(index["items"].as_array().expect("items").is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_list_keeps_insertion_order() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for content in ["one", "two", "three"] {
        let res = c
            .post(format!("{}/api/comment", app.base_url))
            .json(&json!({"role": "user", "content": content}))
            .send()
            .await?;
        assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    }

    let res = c.get(format!("{}/api/comment", app.base_url)).send().await?;
    let index = res.json::<serde_json::Value>().await?;
    assert_eq!(index["count"], 3);
    let contents: Vec<_> = index["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|i| i["content"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(contents, vec!["one", "two", "three"]);
    Ok(())
}

#[tokio::test]
async fn e2e_user_validation_and_update_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Email without '@' -> 400 with a message body.
    let res = c
        .post(format!("{}/api/user", app.base_url))
        .json(&json!({"name": "Bob", "email": "bob.example.com"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["message"].as_str().is_some());

    // Update of an absent id -> 404.
    let res = c
        .put(format!("{}/api/user/{}", app.base_url, Uuid::new_v4()))
        .json(&json!({"name": "Bob", "email": "bob@example.com"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_department_crud() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/api/department", app.base_url))
        .json(&json!({"name": "engineering", "description": "builds things"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_str().expect("assigned id").to_owned();
    assert_eq!(created["version"], 0);

    let res = c.get(format!("{}/api/department/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched["name"], "engineering");
    assert_eq!(fetched["description"], "builds things");

    let res = c
        .put(format!("{}/api/department/{}", app.base_url, id))
        .json(&json!({"name": "engineering", "description": "builds and ships things"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["version"], 1);
    assert_eq!(updated["description"], "builds and ships things");
    Ok(())
}

#[tokio::test]
async fn e2e_sample_endpoints() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(format!("{}/sample", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.text().await?, "Hello World!");

    let res = c.get(format!("{}/sample/square/12", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.json::<i64>().await?, 144);

    let res = c
        .post(format!("{}/sample/bmi", app.base_url))
        .json(&json!({"height": 1.75, "weight": 70.0}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let value = res.json::<f64>().await?;
    assert!((value - 22.857).abs() < 0.001);

    let res = c.get(format!("{}/sample/path/7", app.base_url)).send().await?;
    assert_eq!(res.text().await?, "received 7 as a path parameter");

    let res = c.get(format!("{}/sample/query?id=9", app.base_url)).send().await?;
    assert_eq!(res.text().await?, "received 9 as a query parameter");
    Ok(())
}
