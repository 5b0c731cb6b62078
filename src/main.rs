mod calendar;
mod config;
mod data;
mod error;
mod filter;
mod gallery;
mod handlers;
mod ics;
mod models;
mod state;
mod timeline;

use axum::{routing::get, Router};
use config::Config;
use data::SiteData;
use error::AppResult;
use state::AppState;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn app(app_state: AppState) -> Router {
    let assets = ServeDir::new(&app_state.config.assets_dir);

    Router::new()
        .route("/", get(handlers::root_handler))
        .nest_service("/assets", assets)
        .route("/api/health", get(handlers::health))
        .route("/api/events", get(handlers::list_events))
        .route("/api/events/upcoming", get(handlers::upcoming_events))
        .route("/api/events/calendar", get(handlers::month_calendar))
        .route("/api/events/week", get(handlers::week_calendar))
        .route("/api/events/{id}", get(handlers::get_event))
        .route("/api/events/{id}/ics", get(handlers::event_ics))
        .route("/api/calendar.ics", get(handlers::calendar_feed))
        .route("/api/photos", get(handlers::list_photos))
        .route("/api/photos/albums", get(handlers::photo_albums))
        .route("/api/photos/{id}", get(handlers::get_photo))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn load_site_data(config: &Config) -> AppResult<SiteData> {
    match &config.site_data {
        Some(path) => SiteData::from_json_file(path),
        None => {
            tracing::info!("no SITE_DATA configured, using built-in club data");
            Ok(SiteData::seed())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = Config::from_env()?;
    init_tracing();

    let data = load_site_data(&config)?;
    let addr = config.listen_addr();
    let app_state = AppState::new(data, config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app(app_state)).await?;
    Ok(())
}
