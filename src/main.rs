mod app;
mod config;
mod error;
mod state;
mod users;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::state::AppState;

const DEFAULT_LOG_FILTER: &str = "userbook=debug,axum=info,tower_http=info";

/// `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` emits JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.with_target(false).json().init(),
        _ => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let app = app::build_app(AppState::init(config.clone()));
    app::serve(app, &config).await
}
