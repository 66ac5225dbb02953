//! # Yelp-Camp Binary
//!
//! The entry point that assembles the application based on compile-time features.

use std::time::Duration;

use actix_files::Files;
use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use secrecy::ExposeSecret;
use yc_api::handlers::{self, AppState};
use yc_api::middleware::{method_override, security_headers, standard_middleware};
use yc_api::session::session_middleware;
use yc_config::Settings;

// Feature-gated imports: the plugins are chosen at compile time
#[cfg(feature = "db-sqlite")]
use yc_db_sqlite::SqliteCampgroundRepo;

#[cfg(feature = "session-memory")]
use yc_session_memory::MemorySessionStore;

#[cfg(not(feature = "db-sqlite"))]
compile_error!("no database plugin selected; enable the `db-sqlite` feature");

#[cfg(not(feature = "session-memory"))]
compile_error!("no session plugin selected; enable the `session-memory` feature");

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::load()?;

    // 1. Initialize Database Implementation
    let repo = SqliteCampgroundRepo::connect(&settings.database.url, settings.database.max_connections)
        .await
        .inspect_err(|err| log::error!("Database connection error: {err:#}"))?;

    // 2. Initialize Session Implementation
    let sessions = MemorySessionStore::with_ttl(
        settings.session.secret.expose_secret(),
        Duration::from_secs(settings.session.flash_ttl_secs),
    )?;

    // 3. Wrap in AppState (Using dynamic dispatch for maximum flexibility)
    let state = web::Data::new(AppState::new(
        Box::new(repo.clone()),
        Box::new(sessions),
        settings.session.cookie_name.clone(),
    ));

    let static_dir = settings.server.static_dir.clone();
    let (host, port) = settings.bind_address();
    log::info!("Yelp-Camp starting on http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(from_fn(session_middleware))
            .wrap(from_fn(method_override))
            .wrap(security_headers())
            .wrap(standard_middleware())
            .service(Files::new("/static", &static_dir))
            .configure(yc_api::configure_routes)
            .default_service(web::to(handlers::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    log::info!("Server stopped, closing database");
    repo.close().await;
    Ok(())
}
