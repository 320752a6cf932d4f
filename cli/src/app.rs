//! Interactive screen loop.
//!
//! Each screen renders, reads one command, and either stays or hands back the
//! next `Route`. `None` means the user quit (or input ended).

use std::io::{BufRead, Write};

use posts_core::views::user_list::PendingFetch;
use posts_core::views::{UserListView, UserPostsState};
use posts_core::{ApiClient, Route, UserPostsView};

use crate::render;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Quit,
    Back,
    Next,
    Previous,
    Retry,
    Page(u32),
    Open(usize),
    New,
    Cancel,
    Delete(usize),
    Help,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Command {
        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or("");
        let arg = words.next();
        match (head, arg) {
            ("q" | "quit", None) => Command::Quit,
            ("b" | "back", None) => Command::Back,
            ("n" | "next", None) => Command::Next,
            ("p" | "prev", None) => Command::Previous,
            ("r" | "retry", None) => Command::Retry,
            ("new", None) => Command::New,
            ("cancel", None) => Command::Cancel,
            ("h" | "help" | "?", None) => Command::Help,
            ("page", Some(n)) => n.parse().map_or_else(|_| Command::Unknown(line.to_string()), Command::Page),
            ("del" | "delete", Some(n)) => match n.parse::<usize>() {
                Ok(row) if row > 0 => Command::Delete(row),
                _ => Command::Unknown(line.to_string()),
            },
            (row, None) => match row.parse::<usize>() {
                Ok(row) if row > 0 => Command::Open(row),
                _ => Command::Unknown(line.to_string()),
            },
            _ => Command::Unknown(line.to_string()),
        }
    }
}

const USERS_HELP: &str = "commands: <row> open user, n next, p prev, page <n>, r retry, q quit";
const POSTS_HELP: &str = "commands: new, cancel, del <n>, back, q quit";

pub struct App<T, R, W> {
    client: ApiClient,
    transport: T,
    users: UserListView,
    input: R,
    out: W,
}

impl<T: Transport, R: BufRead, W: Write> App<T, R, W> {
    pub fn new(client: ApiClient, page_size: u32, transport: T, input: R, out: W) -> Self {
        Self {
            users: UserListView::new(client.clone(), page_size),
            client,
            transport,
            input,
            out,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut route = Route::Users;
        loop {
            let next = match &route {
                Route::Users => self.users_screen()?,
                Route::UserPosts { user_id } => self.posts_screen(user_id)?,
            };
            match next {
                Some(next) => route = next,
                None => return Ok(()),
            }
        }
    }

    fn users_screen(&mut self) -> anyhow::Result<Option<Route>> {
        let fetch = self.users.load();
        self.fetch_users(fetch);

        loop {
            write!(self.out, "\n{}", render::users_screen(&self.users))?;
            let Some(line) = self.prompt("> ")? else {
                return Ok(None);
            };
            let fetch = match Command::parse(&line) {
                Command::Quit => return Ok(None),
                Command::Open(row) => match self.users.open_user(row - 1) {
                    Some(route) => return Ok(Some(route)),
                    None => {
                        writeln!(self.out, "no user in row {row}")?;
                        None
                    }
                },
                Command::Next => self.users.next_page(),
                Command::Previous => self.users.previous_page(),
                Command::Page(n) => self.users.select_page(n),
                Command::Retry => self.users.retry(),
                _ => {
                    writeln!(self.out, "{USERS_HELP}")?;
                    None
                }
            };
            if let Some(fetch) = fetch {
                self.fetch_users(fetch);
            }
        }
    }

    fn fetch_users(&mut self, mut fetch: PendingFetch) {
        loop {
            let reply = self.transport.execute(fetch.request.clone());
            self.users.receive(fetch, reply);
            if !self.users.needs_reload() {
                return;
            }
            fetch = self.users.load();
        }
    }

    fn posts_screen(&mut self, user_id: &str) -> anyhow::Result<Option<Route>> {
        let mut view = UserPostsView::new(self.client.clone(), user_id);
        let (user, posts) = view.load();
        let reply = self.transport.execute(user.request.clone());
        view.receive_user(user, reply);
        let reply = self.transport.execute(posts.request.clone());
        view.receive_posts(posts, reply);

        loop {
            write!(self.out, "\n{}", render::posts_screen(&view))?;
            self.flush_notifications(&mut view)?;
            let Some(line) = self.prompt("> ")? else {
                return Ok(None);
            };
            let not_found = view.state() == UserPostsState::NotFound;
            match Command::parse(&line) {
                Command::Quit => return Ok(None),
                Command::Back => return Ok(Some(view.back())),
                Command::New if !not_found => self.create_post(&mut view)?,
                Command::Cancel => view.dialog_mut().close(),
                Command::Delete(row) if !not_found => {
                    let Some(post_id) = view.posts().get(row - 1).map(|p| p.id.clone()) else {
                        writeln!(self.out, "no post in row {row}")?;
                        continue;
                    };
                    if let Some(pending) = view.delete_post(&post_id) {
                        // Show the removal before the request goes out.
                        write!(self.out, "\n{}", render::posts_screen(&view))?;
                        self.out.flush()?;
                        let reply = self.transport.execute(pending.request.clone());
                        view.finish_delete(pending, reply);
                    }
                }
                _ if not_found => writeln!(self.out, "commands: back, q quit")?,
                _ => writeln!(self.out, "{POSTS_HELP}")?,
            }
        }
    }

    /// Prompt for the draft fields (blank input keeps the current value, so a
    /// failed submission can be retried as is) and submit.
    fn create_post(&mut self, view: &mut UserPostsView) -> anyhow::Result<()> {
        view.dialog_mut().open();

        let current = view.dialog().title().to_string();
        let Some(title) = self.prompt(&field_prompt("Post title", &current))? else {
            return Ok(());
        };
        if !title.is_empty() {
            view.dialog_mut().set_title(title);
        }

        let current = view.dialog().body().to_string();
        let Some(body) = self.prompt(&field_prompt("Post body", &current))? else {
            return Ok(());
        };
        if !body.is_empty() {
            view.dialog_mut().set_body(body);
        }

        if let Some(pending) = view.submit_post() {
            writeln!(self.out, "Publishing...")?;
            let reply = self.transport.execute(pending.request.clone());
            view.finish_create(pending, reply);
        }
        Ok(())
    }

    fn flush_notifications(&mut self, view: &mut UserPostsView) -> anyhow::Result<()> {
        for note in view.take_notifications() {
            writeln!(self.out, "{}", render::notification(&note))?;
        }
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn field_prompt(label: &str, current: &str) -> String {
    if current.is_empty() {
        format!("{label}: ")
    } else {
        format!("{label} [{current}]: ")
    }
}
