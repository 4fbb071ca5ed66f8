//! Headless admin client for the LexiMon language-learning platform.
//!
//! The crate owns everything between the keyboard and the REST API: typed
//! models, the gateway client, session + navigation state, and per-screen
//! controllers. Rendering is somebody else's job.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::AppResult;
use crate::nav::{Navigator, Route};
use crate::notice::Notices;
use crate::session::{FileTokenStore, Session, TokenStore};

pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod api;
pub mod error;
pub mod model;
pub mod nav;
pub mod notice;
pub mod screen;
pub mod session;

static APPLICATION_NAME: &str = "leximon-admin";

/// Everything a UI shell (or the CLI) needs to drive the screens.
pub struct AdminApp {
    session: Arc<Session>,
    navigator: Arc<Navigator>,
    notices: Arc<Notices>,
    api: ApiClient,
}

impl AdminApp {
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    pub fn notices(&self) -> &Arc<Notices> {
        &self.notices
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

/// Build the app from the configuration file, with the token persisted under
/// the platform config dir.
pub async fn build_app() -> AppResult<AdminApp> {
    let use_local = cfg!(debug_assertions);
    let config = Config::get_or_init(use_local).await;
    let store = FileTokenStore::new(config.session().token_file());
    build_app_with(
        config.api().base_url(),
        config.api().timeout(),
        Box::new(store),
    )
}

/// Build the app against an explicit base URL and token store. Tests point
/// this at a stub server with an in-memory store.
pub fn build_app_with(
    base_url: &str,
    timeout: std::time::Duration,
    store: Box<dyn TokenStore>,
) -> AppResult<AdminApp> {
    let session = Arc::new(Session::init(store));
    let initial = if session.is_authenticated() {
        Route::Dashboard
    } else {
        Route::Login
    };
    let navigator = Arc::new(Navigator::new(initial));
    let notices = Arc::new(Notices::new());
    let api = ApiClient::new(
        base_url,
        timeout,
        session.clone(),
        navigator.clone(),
        notices.clone(),
    )?;

    Ok(AdminApp {
        session,
        navigator,
        notices,
        api,
    })
}

pub fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}
