//! Stateless HTTP request builder and response parser for the users/posts API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes the host's `Reply`.
//! Nothing here retries, times out, or authenticates.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, Reply};
use crate::types::{NewPost, Paginated, Post, User};

const LIST_USERS_FAILED: &str = "Failed to fetch users";
const GET_USER_FAILED: &str = "Failed to fetch user";
const LIST_POSTS_FAILED: &str = "Failed to fetch user posts";
const CREATE_POST_FAILED: &str = "Failed to create post";
const DELETE_POST_FAILED: &str = "Failed to delete post";

/// Synchronous, stateless client for the users/posts API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_users(&self, page_number: u32, page_size: u32) -> HttpRequest {
        self.get(format!(
            "{}/users?pageNumber={page_number}&pageSize={page_size}",
            self.base_url
        ))
    }

    pub fn build_get_user(&self, id: &str) -> HttpRequest {
        self.get(format!("{}/users/{}", self.base_url, urlencoding::encode(id)))
    }

    pub fn build_list_user_posts(&self, user_id: &str) -> HttpRequest {
        self.get(format!(
            "{}/posts?userId={}",
            self.base_url,
            urlencoding::encode(user_id)
        ))
    }

    pub fn build_create_post(&self, input: &NewPost) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        tracing::debug!(user_id = %input.user_id, "building create post request");
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/posts", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_post(&self, post_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/posts/{}", self.base_url, urlencoding::encode(post_id)),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_users(&self, reply: Reply) -> Result<Paginated<User>, ApiError> {
        parse_json(reply, LIST_USERS_FAILED)
    }

    pub fn parse_get_user(&self, reply: Reply) -> Result<User, ApiError> {
        parse_json(reply, GET_USER_FAILED)
    }

    pub fn parse_list_user_posts(&self, reply: Reply) -> Result<Vec<Post>, ApiError> {
        parse_json(reply, LIST_POSTS_FAILED)
    }

    pub fn parse_create_post(&self, reply: Reply) -> Result<Post, ApiError> {
        parse_json(reply, CREATE_POST_FAILED)
    }

    /// Any 2xx counts as deleted; the body is not inspected.
    pub fn parse_delete_post(&self, reply: Reply) -> Result<(), ApiError> {
        let response = reply?;
        if !response.is_success() {
            return Err(ApiError::Request {
                status: response.status,
                message: DELETE_POST_FAILED,
            });
        }
        Ok(())
    }

    fn get(&self, url: String) -> HttpRequest {
        tracing::debug!(%url, "building GET request");
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }
}

fn parse_json<T: DeserializeOwned>(reply: Reply, failure: &'static str) -> Result<T, ApiError> {
    let response = reply?;
    if !response.is_success() {
        return Err(ApiError::Request {
            status: response.status,
            message: failure,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3000")
    }

    fn reply(status: u16, body: &str) -> Reply {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    #[test]
    fn build_list_users_carries_page_query() {
        let req = client().build_list_users(2, 4);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/users?pageNumber=2&pageSize=4");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_user_escapes_id() {
        let req = client().build_get_user("a b");
        assert_eq!(req.url, "http://localhost:3000/users/a%20b");
    }

    #[test]
    fn build_list_user_posts_filters_by_user() {
        let req = client().build_list_user_posts("3");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/posts?userId=3");
    }

    #[test]
    fn build_create_post_sends_json() {
        let input = NewPost {
            title: "Hello".to_string(),
            body: "World".to_string(),
            user_id: "1".to_string(),
        };
        let req = client().build_create_post(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/posts");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Hello");
        assert_eq!(body["body"], "World");
        assert_eq!(body["userId"], "1");
    }

    #[test]
    fn build_delete_post_has_no_body() {
        let req = client().build_delete_post("9");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/posts/9");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.build_list_user_posts("1").url, "http://localhost:3000/posts?userId=1");
    }

    #[test]
    fn parse_list_users_success() {
        let body = r#"{"data":[{"id":1,"name":"Ann","email":"a@x.io","phone":"1",
            "address":{"street":"s","city":"c","state":"st","zipcode":"z"}}],
            "total":1,"pageNumber":1,"pageSize":4,"totalPages":1}"#;
        let page = client().parse_list_users(reply(200, body)).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, "1");
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn parse_list_users_failure_is_request_error() {
        let err = client().parse_list_users(reply(500, "boom")).unwrap_err();
        assert_eq!(
            err,
            ApiError::Request {
                status: 500,
                message: "Failed to fetch users"
            }
        );
        assert_eq!(err.to_string(), "Failed to fetch users");
    }

    #[test]
    fn parse_get_user_not_found_is_generic_request_error() {
        let err = client().parse_get_user(reply(404, "")).unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn parse_create_post_accepts_any_success_status() {
        let body = r#"{"id":"11","title":"t","body":"b","userId":"1"}"#;
        assert!(client().parse_create_post(reply(200, body)).is_ok());
        assert!(client().parse_create_post(reply(201, body)).is_ok());
    }

    #[test]
    fn parse_delete_post_ignores_body() {
        assert!(client().parse_delete_post(reply(204, "")).is_ok());
        assert!(client().parse_delete_post(reply(200, "{}")).is_ok());
    }

    #[test]
    fn parse_delete_post_failure() {
        let err = client().parse_delete_post(reply(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::Request { status: 404, .. }));
    }

    #[test]
    fn transport_failure_passes_through() {
        let err = client()
            .parse_list_user_posts(Err(ApiError::Transport("refused".to_string())))
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn parse_list_user_posts_bad_json() {
        let err = client().parse_list_user_posts(reply(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
