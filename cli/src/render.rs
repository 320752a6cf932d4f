//! Plain-text rendering of the screens.

use std::fmt::Write;

use posts_core::views::{PaginationControls, UserListState, UserPostsState};
use posts_core::{format_address, Level, Notification, PageToken, UserListView, UserPostsView};

const ADDRESS_WIDTH: usize = 40;

pub fn users_screen(view: &UserListView) -> String {
    let mut out = String::from("Users\n\n");
    match view.state() {
        UserListState::Loading => out.push_str("  loading...\n"),
        UserListState::Error(message) => {
            let _ = writeln!(out, "Error Loading Users\n  {message}\n  [r] Retry");
            return out;
        }
        UserListState::Ready(page) => {
            let _ = writeln!(out, "  #  {:<24} {:<32} Address", "Full name", "Email address");
            for (row, user) in page.data.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:>3}  {:<24} {:<32} {}",
                    row + 1,
                    user.name,
                    user.email,
                    truncate(&format_address(&user.address), ADDRESS_WIDTH)
                );
            }
        }
    }
    if let Some(controls) = view.pagination() {
        let _ = writeln!(out, "\n{}", pagination_bar(&controls));
    }
    out
}

pub fn pagination_bar(controls: &PaginationControls) -> String {
    let mut parts = Vec::with_capacity(controls.tokens.len() + 2);
    let previous = if controls.previous_enabled { "< Previous" } else { "  Previous" };
    parts.push(previous.to_string());
    for token in &controls.tokens {
        parts.push(match token {
            PageToken::Page(n) if *n == controls.current => format!("[{n}]"),
            PageToken::Page(n) => n.to_string(),
            PageToken::Ellipsis => "...".to_string(),
        });
    }
    let next = if controls.next_enabled { "Next >" } else { "Next  " };
    parts.push(next.to_string());
    parts.join(" ")
}

pub fn posts_screen(view: &UserPostsView) -> String {
    match view.state() {
        UserPostsState::Loading => "loading...\n".to_string(),
        UserPostsState::NotFound => "User Not Found\n  [back] Back to Users\n".to_string(),
        UserPostsState::Ready { user, posts } => {
            let mut out = format!("Users > {}\n\n{}\n", user.name, user.name);
            let _ = writeln!(out, "{} \u{2022} {} Posts\n", user.email, posts.len());
            for (row, post) in posts.iter().enumerate() {
                let _ = writeln!(out, "{:>3}. {}\n     {}", row + 1, post.title, post.body);
            }
            if view.dialog().is_open() {
                out.push_str("\n(new post draft open)\n");
            }
            out
        }
    }
}

pub fn notification(note: &Notification) -> String {
    match note.level {
        Level::Success => format!("[ok] {}", note.message),
        Level::Error => format!("[error] {}", note.message),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}
