//! Terminal front end for the users/posts API.
//!
//! The core builds requests and keeps view state; this binary executes the
//! requests with ureq and draws the screens as text.

mod app;
mod config;
mod render;
mod transport;

use std::io;

use posts_core::ApiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::App;
use crate::config::Config;
use crate::transport::UreqTransport;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!(base_url = %config.api_base_url, page_size = config.page_size, "starting");

    let client = ApiClient::new(&config.api_base_url);
    let stdin = io::stdin();
    let mut app = App::new(
        client,
        config.page_size,
        UreqTransport::new(),
        stdin.lock(),
        io::stdout(),
    );
    app.run()
}
