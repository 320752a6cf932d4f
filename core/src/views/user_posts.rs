//! A user's detail header plus their posts, with create and delete.
//!
//! # Design
//! The user and the post list are fetched independently and the screen
//! renders once both have settled. Each `load()` bumps a generation counter;
//! replies tagged with an older generation are dropped.
//!
//! Deletion is optimistic: the post leaves the cache before the request is
//! even built. The `PendingDelete` returned to the host carries the removed
//! post and its position, so a failed delete restores exactly what that
//! invocation removed. Concurrent deletes therefore roll back independently,
//! and a delete whose cache was replaced by a newer fetch leaves the newer
//! list alone.

use crate::client::ApiClient;
use crate::http::{HttpRequest, Reply};
use crate::notification::Notification;
use crate::types::{Post, User};
use crate::views::create_post::CreatePostDialog;
use crate::views::Route;

#[derive(Debug, Clone)]
enum Slot<T> {
    Pending,
    Loaded(T),
    Failed,
}

/// Rendering state, borrowed from the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserPostsState<'a> {
    Loading,
    NotFound,
    Ready { user: &'a User, posts: &'a [Post] },
}

#[derive(Debug, Clone)]
pub struct PendingUser {
    pub request: HttpRequest,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct PendingPosts {
    pub request: HttpRequest,
    generation: u64,
}

#[derive(Debug, Clone)]
struct RemovalSnapshot {
    index: usize,
    post: Post,
}

/// An in-flight delete and the rollback data scoped to it.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub request: HttpRequest,
    generation: u64,
    snapshot: RemovalSnapshot,
}

impl PendingDelete {
    pub fn post_id(&self) -> &str {
        &self.snapshot.post.id
    }
}

#[derive(Debug, Clone)]
pub struct PendingCreate {
    pub request: HttpRequest,
}

#[derive(Debug, Clone)]
pub struct UserPostsView {
    client: ApiClient,
    user_id: String,
    generation: u64,
    user: Slot<User>,
    posts: Slot<Vec<Post>>,
    deletes_in_flight: usize,
    dialog: CreatePostDialog,
    notifications: Vec<Notification>,
}

impl UserPostsView {
    pub fn new(client: ApiClient, user_id: impl Into<String>) -> Self {
        Self {
            client,
            user_id: user_id.into(),
            generation: 0,
            user: Slot::Pending,
            posts: Slot::Pending,
            deletes_in_flight: 0,
            dialog: CreatePostDialog::default(),
            notifications: Vec::new(),
        }
    }

    /// Start (or restart) both fetches. Replies to any earlier `load()` are
    /// ignored from here on.
    pub fn load(&mut self) -> (PendingUser, PendingPosts) {
        self.generation += 1;
        self.user = Slot::Pending;
        self.posts = Slot::Pending;
        (
            PendingUser {
                request: self.client.build_get_user(&self.user_id),
                generation: self.generation,
            },
            PendingPosts {
                request: self.client.build_list_user_posts(&self.user_id),
                generation: self.generation,
            },
        )
    }

    pub fn receive_user(&mut self, fetch: PendingUser, reply: Reply) -> bool {
        if fetch.generation != self.generation {
            return false;
        }
        self.user = match self.client.parse_get_user(reply) {
            Ok(user) => Slot::Loaded(user),
            Err(err) => {
                tracing::info!(user_id = %self.user_id, error = %err, "user lookup failed");
                Slot::Failed
            }
        };
        true
    }

    pub fn receive_posts(&mut self, fetch: PendingPosts, reply: Reply) -> bool {
        if fetch.generation != self.generation {
            return false;
        }
        self.posts = match self.client.parse_list_user_posts(reply) {
            Ok(posts) => Slot::Loaded(posts),
            Err(err) => {
                tracing::warn!(user_id = %self.user_id, error = %err, "failed to load posts");
                self.notifications.push(Notification::error(err.to_string()));
                Slot::Failed
            }
        };
        true
    }

    pub fn state(&self) -> UserPostsState<'_> {
        match (&self.user, &self.posts) {
            (Slot::Pending, _) | (_, Slot::Pending) => UserPostsState::Loading,
            (Slot::Failed, _) => UserPostsState::NotFound,
            (Slot::Loaded(user), posts) => UserPostsState::Ready {
                user,
                posts: match posts {
                    Slot::Loaded(posts) => posts.as_slice(),
                    _ => &[],
                },
            },
        }
    }

    pub fn posts(&self) -> &[Post] {
        match &self.posts {
            Slot::Loaded(posts) => posts.as_slice(),
            _ => &[],
        }
    }

    /// The only way out of the not-found state, also used by the breadcrumb.
    pub fn back(&self) -> Route {
        Route::Users
    }

    pub fn is_deleting(&self) -> bool {
        self.deletes_in_flight > 0
    }

    /// Remove `post_id` from the cache immediately and build the delete
    /// request. `None` if the post is not in the cache.
    pub fn delete_post(&mut self, post_id: &str) -> Option<PendingDelete> {
        let Slot::Loaded(posts) = &mut self.posts else {
            return None;
        };
        let index = posts.iter().position(|p| p.id == post_id)?;
        let post = posts.remove(index);
        self.deletes_in_flight += 1;
        Some(PendingDelete {
            request: self.client.build_delete_post(post_id),
            generation: self.generation,
            snapshot: RemovalSnapshot { index, post },
        })
    }

    pub fn finish_delete(&mut self, pending: PendingDelete, reply: Reply) {
        self.deletes_in_flight = self.deletes_in_flight.saturating_sub(1);
        match self.client.parse_delete_post(reply) {
            Ok(()) => {
                self.notifications
                    .push(Notification::success("Post deleted successfully"));
            }
            Err(err) => {
                tracing::warn!(post_id = %pending.post_id(), error = %err, "delete failed, rolling back");
                self.restore(pending);
                self.notifications.push(Notification::error(err.to_string()));
            }
        }
    }

    fn restore(&mut self, pending: PendingDelete) {
        if pending.generation != self.generation {
            return;
        }
        let Slot::Loaded(posts) = &mut self.posts else {
            return;
        };
        let RemovalSnapshot { index, post } = pending.snapshot;
        if posts.iter().any(|p| p.id == post.id) {
            return;
        }
        posts.insert(index.min(posts.len()), post);
    }

    pub fn dialog(&self) -> &CreatePostDialog {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut CreatePostDialog {
        &mut self.dialog
    }

    /// Validate the dialog and build the create request. Validation failures
    /// are reported as a notification and nothing is sent.
    pub fn submit_post(&mut self) -> Option<PendingCreate> {
        if self.dialog.is_submitting() {
            return None;
        }
        let new_post = match self.dialog.validate(&self.user_id) {
            Ok(new_post) => new_post,
            Err(err) => {
                self.notifications.push(Notification::error(err.to_string()));
                return None;
            }
        };
        match self.client.build_create_post(&new_post) {
            Ok(request) => {
                self.dialog.begin_submit();
                Some(PendingCreate { request })
            }
            Err(err) => {
                self.notifications.push(Notification::error(err.to_string()));
                None
            }
        }
    }

    pub fn finish_create(&mut self, _pending: PendingCreate, reply: Reply) {
        match self.client.parse_create_post(reply) {
            Ok(post) => {
                match &mut self.posts {
                    // A refetch may already have picked the new post up.
                    Slot::Loaded(posts) if posts.iter().any(|p| p.id == post.id) => {}
                    Slot::Loaded(posts) => posts.push(post),
                    slot => *slot = Slot::Loaded(vec![post]),
                }
                self.dialog.submit_succeeded();
                self.notifications
                    .push(Notification::success("Post created successfully"));
            }
            Err(err) => {
                tracing::warn!(user_id = %self.user_id, error = %err, "create post failed");
                self.dialog.submit_failed();
                self.notifications.push(Notification::error(err.to_string()));
            }
        }
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
