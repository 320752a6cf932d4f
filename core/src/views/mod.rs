//! Headless view models for the two screens and the create-post dialog.
//!
//! # Design
//! Views never perform I/O. An action that needs the network returns a
//! pending value holding the `HttpRequest` plus whatever the view needs to
//! reconcile the outcome later; the host executes the request and passes the
//! pending value back together with the `Reply`. Tagging each pending value
//! with the key or generation it was issued for lets a view drop replies that
//! were superseded in the meantime.

pub mod create_post;
pub mod user_list;
pub mod user_posts;

pub use create_post::{CreatePostDialog, ValidationError};
pub use user_list::{PaginationControls, UserListState, UserListView};
pub use user_posts::{PendingCreate, PendingDelete, UserPostsState, UserPostsView};

/// Screen the host should show next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Users,
    UserPosts { user_id: String },
}
