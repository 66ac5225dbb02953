//! yelp-camp/crates/yc-api/src/middleware.rs Middleware
//!
//! Custom middleware for logging, security headers and form method override.

use std::collections::HashMap;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::middleware::{DefaultHeaders, Logger, Next};
use actix_web::{web, Error};

// Returns a standard set of middleware for the Yelp-Camp app.
pub fn standard_middleware() -> Logger {
    // We use the 'default' logger which outputs:
    // remote-ip "request-line" status-code response-size "referrer" "user-agent"
    Logger::default()
}

// Security headers added to every response.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
        .add(("X-Frame-Options", "DENY"))
}

/// Lets HTML forms reach PUT/PATCH/DELETE routes: a POST carrying
/// `?_method=<verb>` is re-dispatched as that verb before routing.
pub async fn method_override(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if req.method() == Method::POST {
        if let Some(method) = override_target(req.query_string()) {
            log::debug!("method override: POST -> {method} {}", req.path());
            req.head_mut().method = method;
        }
    }
    next.call(req).await
}

fn override_target(query: &str) -> Option<Method> {
    let params = web::Query::<HashMap<String, String>>::from_query(query).ok()?;
    let verb = params.get("_method")?;

    match verb.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
