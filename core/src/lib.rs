//! Client core for the users/posts management interface.
//!
//! # Overview
//! Builds `HttpRequest` values and parses replies without touching the
//! network (host-does-IO pattern). On top of the API client sit headless
//! view models for the user table, the user's posts screen and the
//! create-post dialog, plus the page-number window used by the pagination
//! control.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes reply), so the I/O boundary is explicit.
//! - Views hand pending values to the host and take them back with the
//!   reply, which is how stale replies and per-delete rollback are scoped.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod notification;
pub mod pagination;
pub mod types;
pub mod views;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Reply};
pub use notification::{Level, Notification};
pub use pagination::{page_window, PageToken, Pager};
pub use types::{format_address, Address, NewPost, Paginated, Post, User};
pub use views::{Route, UserListView, UserPostsView};
