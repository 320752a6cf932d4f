use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    pub user_id: Option<String>,
}

fn default_page_number() -> u32 {
    1
}

fn default_page_size() -> u32 {
    4
}

/// In-memory users and posts. Post ids are assigned from a counter so they
/// stay numeric strings like the seeded ones.
#[derive(Debug, Default)]
pub struct Store {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    next_post_id: u64,
}

const FIRST_NAMES: [&str; 10] = [
    "Leanne", "Ervin", "Clementine", "Patricia", "Chelsey", "Dennis", "Kurtis", "Nicholas",
    "Glenna", "Clementina",
];
const LAST_NAMES: [&str; 10] = [
    "Graham", "Howell", "Bauch", "Lebsack", "Dietrich", "Schulist", "Weissnat", "Runolfsdottir",
    "Reichert", "DuBuque",
];
const CITIES: [&str; 5] = ["Gwenborough", "Wisokyburgh", "McKenziehaven", "South Elvis", "Roscoeview"];

impl Store {
    pub fn new(users: Vec<User>, posts: Vec<Post>) -> Self {
        let next_post_id = posts
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            users,
            posts,
            next_post_id,
        }
    }

    /// Ten users with three posts each.
    pub fn seeded() -> Self {
        let users: Vec<User> = FIRST_NAMES
            .iter()
            .zip(LAST_NAMES.iter())
            .enumerate()
            .map(|(i, (first, last))| User {
                id: (i + 1).to_string(),
                name: format!("{first} {last}"),
                email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
                phone: format!("555-01{:02}", i + 1),
                address: Address {
                    street: format!("{} Kulas Light", 100 + i),
                    city: CITIES[i % CITIES.len()].to_string(),
                    state: "CA".to_string(),
                    zipcode: format!("9{:04}", 1000 + i),
                },
            })
            .collect();

        let posts = users
            .iter()
            .flat_map(|user| (1..=3).map(move |n| (user.id.clone(), n)))
            .enumerate()
            .map(|(i, (user_id, n))| Post {
                id: (i + 1).to_string(),
                title: format!("post {n} by user {user_id}"),
                body: format!("Body of post {n} written by user {user_id}."),
                user_id,
            })
            .collect();

        Self::new(users, posts)
    }

    pub fn page_of_users(&self, page_number: u32, page_size: u32) -> Page<User> {
        let page_size = page_size.max(1);
        let total = self.users.len() as u64;
        let total_pages = total.div_ceil(u64::from(page_size)) as u32;
        let start = (page_number.max(1) as usize - 1).saturating_mul(page_size as usize);
        let data = self
            .users
            .iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();
        Page {
            data,
            total,
            page_number,
            page_size,
            total_pages,
        }
    }

    pub fn insert_post(&mut self, input: CreatePost) -> Post {
        self.next_post_id += 1;
        let post = Post {
            id: self.next_post_id.to_string(),
            title: input.title,
            body: input.body,
            user_id: input.user_id,
        };
        self.posts.push(post.clone());
        post
    }

    pub fn remove_post(&mut self, id: &str) -> Option<Post> {
        let index = self.posts.iter().position(|p| p.id == id)?;
        Some(self.posts.remove(index))
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", delete(delete_post))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>, Query(query): Query<PageQuery>) -> Json<Page<User>> {
    let store = db.read().await;
    Json(store.page_of_users(query.page_number, query.page_size))
}

async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<User>, StatusCode> {
    let store = db.read().await;
    store
        .users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_posts(State(db): State<Db>, Query(query): Query<PostsQuery>) -> Json<Vec<Post>> {
    let store = db.read().await;
    let posts = store
        .posts
        .iter()
        .filter(|p| query.user_id.as_ref().map_or(true, |id| &p.user_id == id))
        .cloned()
        .collect();
    Json(posts)
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<CreatePost>,
) -> (StatusCode, Json<Post>) {
    let post = db.write().await.insert_post(input);
    tracing::info!(post_id = %post.id, user_id = %post.user_id, "post created");
    (StatusCode::CREATED, Json(post))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    match db.write().await.remove_post(&id) {
        Some(_) => {
            tracing::info!(post_id = %id, "post deleted");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
