//! # Sessions
//!
//! `session_middleware` attaches a [`SessionId`] to every request, issuing a
//! signed cookie for new visitors. Handlers get at it through the [`Session`]
//! extractor to queue or drain flash messages.

use std::future::{ready, Ready};

use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use yc_core::error::AppError;
use yc_core::models::{Flash, SessionId};

use crate::error::ApiError;
use crate::handlers::AppState;

pub async fn session_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
        log::warn!("AppState missing, request served without a session");
        return next.call(req).await;
    };

    let existing = req
        .cookie(&state.session_cookie)
        .and_then(|cookie| state.sessions.resolve(cookie.value()));

    let (id, issued) = match existing {
        Some(id) => (id, None),
        None => {
            let (id, token) = state.sessions.issue();
            (id, Some(token))
        }
    };
    req.extensions_mut().insert(id);

    let mut res = next.call(req).await?;

    if let Some(token) = issued {
        let cookie = Cookie::build(state.session_cookie.clone(), token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish();
        if let Err(err) = res.response_mut().add_cookie(&cookie) {
            log::warn!("could not set session cookie: {err}");
        }
    }
    Ok(res)
}

/// The current visitor's session.
pub struct Session {
    id: SessionId,
    state: web::Data<AppState>,
}

impl Session {
    /// Queues a message for the next rendered page.
    pub async fn flash(&self, flash: Flash) -> Result<(), ApiError> {
        self.state.sessions.push_flash(self.id, flash).await?;
        Ok(())
    }

    /// Drains the queued messages; call once per rendered page.
    pub async fn take_flashes(&self) -> Result<Vec<Flash>, ApiError> {
        Ok(self.state.sessions.take_flashes(self.id).await?)
    }
}

impl FromRequest for Session {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req.extensions().get::<SessionId>().copied();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        ready(match (id, state) {
            (Some(id), Some(state)) => Ok(Session { id, state }),
            _ => Err(AppError::Internal("session middleware is not installed".to_string()).into()),
        })
    }
}
