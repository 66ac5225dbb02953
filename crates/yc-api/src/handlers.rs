//! # yc-api Handlers
//!
//! This module coordinates the flow between HTTP requests and Core traits.
//! Every handler returns `Result<HttpResponse, ApiError>`: failures bubble up
//! with `?` and are rendered by `ApiError`'s `ResponseError` impl.

use actix_web::http::header::{self, ContentType};
use actix_web::{web, HttpResponse};
use askama::Template;
use uuid::Uuid;
use yc_core::error::AppError;
use yc_core::models::{Campground, Flash, Review};
use yc_core::traits::{CampgroundRepo, SessionStore};
use yc_core::validation::{
    validate_campground, validate_review, CampgroundSubmission, ReviewSubmission,
};
use yc_ui::{
    CampgroundListTemplate, EditCampgroundTemplate, HomeTemplate, NewCampgroundTemplate,
    ShowCampgroundTemplate,
};

use crate::error::ApiError;
use crate::forms::{CampgroundForm, ReviewForm};
use crate::session::Session;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub repo: Box<dyn CampgroundRepo>,
    pub sessions: Box<dyn SessionStore>,
    /// Name of the session cookie
    pub session_cookie: String,
}

impl AppState {
    pub fn new(
        repo: Box<dyn CampgroundRepo>,
        sessions: Box<dyn SessionStore>,
        session_cookie: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            sessions,
            session_cookie: session_cookie.into(),
        }
    }
}

type HandlerResult = Result<HttpResponse, ApiError>;

fn render(page: &impl Template) -> HandlerResult {
    let html = page.render()?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Ids that do not parse can never match a record.
fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(what))
}

/// Renders the landing page for "/"
pub async fn home(session: Session) -> HandlerResult {
    let flashes = session.take_flashes().await?;
    render(&HomeTemplate { title: "Home", flashes: &flashes })
}

/// Renders every campground (no pagination).
pub async fn list_campgrounds(data: web::Data<AppState>, session: Session) -> HandlerResult {
    let campgrounds = data.repo.list_campgrounds().await?;
    let flashes = session.take_flashes().await?;
    render(&CampgroundListTemplate {
        title: "All Campgrounds",
        flashes: &flashes,
        campgrounds: &campgrounds,
    })
}

pub async fn new_campground(session: Session) -> HandlerResult {
    let flashes = session.take_flashes().await?;
    render(&NewCampgroundTemplate { title: "New Campground", flashes: &flashes })
}

pub async fn create_campground(
    data: web::Data<AppState>,
    session: Session,
    form: web::Form<CampgroundForm>,
) -> HandlerResult {
    let input = validate_campground(&CampgroundSubmission::from(form.into_inner()))?;
    let campground = Campground::new(input);
    data.repo.create_campground(&campground).await?;
    log::info!("created campground {} ({})", campground.id, campground.title);

    session.flash(Flash::success("Successfully created a new campground!")).await?;
    Ok(redirect(&format!("/campground/{}", campground.id)))
}

/// Renders one campground with its reviews. An unknown id sends the visitor
/// back to the list with an error flash instead of an error page.
pub async fn show_campground(
    data: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> HandlerResult {
    let found = match Uuid::parse_str(&path) {
        Ok(id) => data.repo.get_campground_with_reviews(id).await?,
        Err(_) => None,
    };

    let Some((campground, reviews)) = found else {
        session.flash(Flash::error(AppError::not_found("Campground").to_string())).await?;
        return Ok(redirect("/campground"));
    };

    let flashes = session.take_flashes().await?;
    render(&ShowCampgroundTemplate {
        title: &campground.title,
        flashes: &flashes,
        campground: &campground,
        reviews: &reviews,
    })
}

pub async fn edit_campground(
    data: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> HandlerResult {
    let id = parse_id(&path, "Campground")?;
    let campground = data
        .repo
        .get_campground(id)
        .await?
        .ok_or_else(|| AppError::not_found("Campground"))?;

    let flashes = session.take_flashes().await?;
    render(&EditCampgroundTemplate {
        title: "Edit Campground",
        flashes: &flashes,
        campground: &campground,
    })
}

/// Validates first, then replaces every field of the stored campground.
pub async fn update_campground(
    data: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CampgroundForm>,
) -> HandlerResult {
    let input = validate_campground(&CampgroundSubmission::from(form.into_inner()))?;
    let id = parse_id(&path, "Campground")?;

    let campground = data
        .repo
        .update_campground(id, input)
        .await?
        .ok_or_else(|| AppError::not_found("Campground"))?;

    session.flash(Flash::success("Successfully updated the campground!")).await?;
    Ok(redirect(&format!("/campground/{}", campground.id)))
}

pub async fn delete_campground(
    data: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> HandlerResult {
    let id = parse_id(&path, "Campground")?;
    if !data.repo.delete_campground(id).await? {
        return Err(AppError::not_found("Campground").into());
    }
    log::info!("deleted campground {id}");

    session.flash(Flash::success("Successfully deleted the campground!")).await?;
    Ok(redirect("/campground"))
}

pub async fn create_review(
    data: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<ReviewForm>,
) -> HandlerResult {
    let campground_id = parse_id(&path, "Campground")?;
    let review = Review::new(validate_review(&ReviewSubmission::from(form.into_inner()))?);

    if !data.repo.add_review(campground_id, &review).await? {
        return Err(AppError::not_found("Campground").into());
    }

    session.flash(Flash::success("Successfully created a new review!")).await?;
    Ok(redirect(&format!("/campground/{campground_id}")))
}

pub async fn delete_review(
    data: web::Data<AppState>,
    session: Session,
    path: web::Path<(String, String)>,
) -> HandlerResult {
    let (raw_campground, raw_review) = path.into_inner();
    let campground_id = parse_id(&raw_campground, "Campground")?;
    let review_id = parse_id(&raw_review, "Review")?;

    if !data.repo.remove_review(campground_id, review_id).await? {
        return Err(AppError::not_found("Review").into());
    }

    session.flash(Flash::success("Successfully deleted the review!")).await?;
    Ok(redirect(&format!("/campground/{campground_id}")))
}

/// Fallback for every unmatched route.
pub async fn not_found() -> HandlerResult {
    Err(AppError::not_found("Page").into())
}
