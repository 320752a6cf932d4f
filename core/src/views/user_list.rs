//! Paginated user table.
//!
//! `loading -> ready` on a successful fetch, `loading -> error` on failure,
//! and `error -> loading` on an explicit retry. A reply is only applied if
//! it was issued for the page the view is currently showing.

use crate::client::ApiClient;
use crate::http::{HttpRequest, Reply};
use crate::pagination::{PageToken, Pager};
use crate::types::{Paginated, User};
use crate::views::Route;

pub const DEFAULT_PAGE_SIZE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserListState {
    Loading,
    Error(String),
    Ready(Paginated<User>),
}

/// A `listUsers` request tagged with the `(page, page_size)` it was issued for.
#[derive(Debug, Clone)]
pub struct PendingFetch {
    pub request: HttpRequest,
    page: u32,
    page_size: u32,
}

/// What the pagination bar should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub tokens: Vec<PageToken>,
    pub current: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct UserListView {
    client: ApiClient,
    page: u32,
    page_size: u32,
    state: UserListState,
    total_pages: Option<u32>,
    needs_reload: bool,
}

impl UserListView {
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        Self {
            client,
            page: 1,
            page_size: page_size.max(1),
            state: UserListState::Loading,
            total_pages: None,
            needs_reload: false,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn state(&self) -> &UserListState {
        &self.state
    }

    /// Enter `Loading` and build the fetch for the current key.
    pub fn load(&mut self) -> PendingFetch {
        self.state = UserListState::Loading;
        self.needs_reload = false;
        PendingFetch {
            request: self.client.build_list_users(self.page, self.page_size),
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Apply a reply. Returns `false` if the reply was for a superseded key
    /// and was dropped.
    ///
    /// If the reply reports fewer pages than the current page number, the
    /// view moves to the last page, stays `Loading` and sets `needs_reload`.
    pub fn receive(&mut self, fetch: PendingFetch, reply: Reply) -> bool {
        if fetch.page != self.page || fetch.page_size != self.page_size {
            tracing::debug!(page = fetch.page, current = self.page, "dropping stale users reply");
            return false;
        }
        self.state = match self.client.parse_list_users(reply) {
            Ok(page) => {
                self.total_pages = Some(page.total_pages);
                let clamped = page.clamp_page(self.page);
                if clamped != self.page {
                    tracing::debug!(page = self.page, last = clamped, "page out of range, moving to last page");
                    self.page = clamped;
                    self.needs_reload = true;
                    UserListState::Loading
                } else {
                    UserListState::Ready(page)
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, page = self.page, "failed to load users");
                UserListState::Error(err.to_string())
            }
        };
        true
    }

    /// Set when a reply moved the view to another page; the host should
    /// `load()` again.
    pub fn needs_reload(&self) -> bool {
        self.needs_reload
    }

    /// Re-issue the fetch after a failure. Only available in the error state,
    /// so each retry action produces exactly one request.
    pub fn retry(&mut self) -> Option<PendingFetch> {
        match self.state {
            UserListState::Error(_) => Some(self.load()),
            _ => None,
        }
    }

    /// Navigate to `page`, clamped to the last known page count. `None` if
    /// that is the page already shown or no page has loaded yet.
    pub fn select_page(&mut self, page: u32) -> Option<PendingFetch> {
        let target = self.pager()?.select(page);
        self.go_to(target)
    }

    pub fn next_page(&mut self) -> Option<PendingFetch> {
        let target = self.pager()?.next()?;
        self.go_to(target)
    }

    pub fn previous_page(&mut self) -> Option<PendingFetch> {
        let target = self.pager()?.previous()?;
        self.go_to(target)
    }

    /// Route to the posts screen for the user in `row` of the current page.
    pub fn open_user(&self, row: usize) -> Option<Route> {
        let user = self.users().get(row)?;
        Some(Route::UserPosts {
            user_id: user.id.clone(),
        })
    }

    pub fn users(&self) -> &[User] {
        match &self.state {
            UserListState::Ready(page) => page.data.as_slice(),
            _ => &[],
        }
    }

    /// Controls appear once the page count is known and stay usable while a
    /// later page is loading.
    pub fn pagination(&self) -> Option<PaginationControls> {
        let pager = self.pager()?;
        Some(PaginationControls {
            tokens: pager.tokens(),
            current: pager.current(),
            previous_enabled: pager.has_previous(),
            next_enabled: pager.has_next(),
        })
    }

    fn pager(&self) -> Option<Pager> {
        self.total_pages.map(|total| Pager::new(self.page, total))
    }

    fn go_to(&mut self, page: u32) -> Option<PendingFetch> {
        if page == self.page {
            return None;
        }
        self.page = page;
        Some(self.load())
    }
}
