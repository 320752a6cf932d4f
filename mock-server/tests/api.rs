use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Page, Post, Store, User};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- users ---

#[tokio::test]
async fn list_users_defaults_to_first_page_of_four() {
    let resp = app().oneshot(get("/users")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: Page<User> = body_json(resp).await;
    assert_eq!(page.data.len(), 4);
    assert_eq!(page.page_number, 1);
    assert_eq!(page.page_size, 4);
    assert_eq!(page.total, 10);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn list_users_honours_page_query() {
    let resp = app()
        .oneshot(get("/users?pageNumber=2&pageSize=3"))
        .await
        .unwrap();

    let page: Page<User> = body_json(resp).await;
    assert_eq!(page.total_pages, 4);
    let ids: Vec<&str> = page.data.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "5", "6"]);
}

#[tokio::test]
async fn list_users_on_empty_store() {
    let resp = app_with(Store::default()).oneshot(get("/users")).await.unwrap();

    let page: Page<User> = body_json(resp).await;
    assert!(page.data.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn list_users_bad_query_returns_400() {
    let resp = app().oneshot(get("/users?pageNumber=abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_user_found() {
    let resp = app().oneshot(get("/users/2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.name, "Ervin Howell");
}

#[tokio::test]
async fn get_user_not_found() {
    let resp = app().oneshot(get("/users/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- posts ---

#[tokio::test]
async fn list_posts_filters_by_user() {
    let resp = app().oneshot(get("/posts?userId=3")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts.len(), 3);
    assert!(posts.iter().all(|p| p.user_id == "3"));
}

#[tokio::test]
async fn list_posts_for_unknown_user_is_empty() {
    let resp = app().oneshot(get("/posts?userId=404")).await.unwrap();

    let posts: Vec<Post> = body_json(resp).await;
    assert!(posts.is_empty());
}

#[tokio::test]
async fn create_post_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/posts",
            r#"{"title":"Hello","body":"World","userId":"1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Post = body_json(resp).await;
    assert_eq!(post.id, "31");
    assert_eq!(post.title, "Hello");
    assert_eq!(post.user_id, "1");
}

#[tokio::test]
async fn create_post_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/posts", r#"{"title":"no body"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_post_not_found() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/posts/999")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full post lifecycle ---

#[tokio::test]
async fn post_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/posts",
            r#"{"title":"Walk dog","body":"Around the block","userId":"2"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Post = body_json(resp).await;
    let id = created.id.clone();

    // list for the owner includes it, appended last
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/posts?userId=2"))
        .await
        .unwrap();
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts.len(), 4);
    assert_eq!(posts.last(), Some(&created));

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(&format!("/posts/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete again: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(&format!("/posts/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list back to the seeded three
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/posts?userId=2"))
        .await
        .unwrap();
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts.len(), 3);
}
