//! # yc-api
//!
//! The web routing and orchestration layer for Yelp-Camp.

pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod session;

use actix_web::error::UrlencodedError;
use actix_web::{web, HttpRequest, Resource};
use yc_core::error::AppError;

use crate::error::ApiError;

/// Configures the routes for the campground site.
///
/// # Developer Note
/// The binary still has to install `session::session_middleware` (and
/// `middleware::method_override` for HTML forms) plus
/// `handlers::not_found` as the default service; `ServiceConfig` cannot wrap
/// middleware around the whole app.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error))
        .service(resource("/").route(web::get().to(handlers::home)))
        .service(
            web::scope("/campground")
                .service(
                    resource("")
                        .route(web::get().to(handlers::list_campgrounds))
                        .route(web::post().to(handlers::create_campground)),
                )
                // Must precede "/{id}"
                .service(resource("/new").route(web::get().to(handlers::new_campground)))
                .service(
                    resource("/{id}")
                        .route(web::get().to(handlers::show_campground))
                        .route(web::put().to(handlers::update_campground))
                        .route(web::patch().to(handlers::update_campground))
                        .route(web::delete().to(handlers::delete_campground)),
                )
                .service(resource("/{id}/edit").route(web::get().to(handlers::edit_campground)))
                .service(resource("/{id}/review").route(web::post().to(handlers::create_review)))
                .service(
                    resource("/{id}/review/{review_id}")
                        .route(web::delete().to(handlers::delete_review)),
                ),
        );
}

/// A resource whose unsupported verbs render the not-found page rather than
/// an empty 405.
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(handlers::not_found))
}

/// Unreadable form bodies are client errors like any other validation failure.
fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::from(AppError::ValidationError(format!("invalid form submission: {err}"))).into()
}
