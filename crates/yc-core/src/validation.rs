//! # Payload validation
//!
//! Turns raw form submissions into typed inputs. Every violated field adds one
//! message; the messages are joined with `,` into a single
//! [`AppError::ValidationError`].

use crate::error::{AppError, Result};
use crate::models::{CampgroundInput, ReviewInput};

/// Raw campground fields as submitted, before any checks.
#[derive(Debug, Clone, Default)]
pub struct CampgroundSubmission {
    pub title: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl CampgroundSubmission {
    fn is_absent(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.location.is_none()
            && self.description.is_none()
    }
}

/// Raw review fields as submitted.
#[derive(Debug, Clone, Default)]
pub struct ReviewSubmission {
    pub body: Option<String>,
    pub rating: Option<String>,
}

/// Collects violations in field order.
#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
    fn push(&mut self, field: &str, rule: &str) {
        self.0.push(format!("\"{field}\" {rule}"));
    }

    fn text(&mut self, field: &str, value: Option<&String>) -> String {
        match value.map(|v| v.trim()) {
            None => {
                self.push(field, "is required");
                String::new()
            }
            Some("") => {
                self.push(field, "is not allowed to be empty");
                String::new()
            }
            Some(v) => v.to_string(),
        }
    }

    fn number(&mut self, field: &str, value: Option<&String>) -> Option<f64> {
        let Some(raw) = value else {
            self.push(field, "is required");
            return None;
        };
        match raw.trim().parse::<f64>() {
            // "-0" is stored and shown as 0
            Ok(n) if n.is_finite() => Some(if n == 0.0 { 0.0 } else { n }),
            _ => {
                self.push(field, "must be a number");
                None
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(AppError::ValidationError(self.0.join(",")))
        }
    }
}

/// Validates a campground submission.
///
/// All five fields are required; text must be non-blank and the price must be
/// a finite number no lower than zero.
pub fn validate_campground(sub: &CampgroundSubmission) -> Result<CampgroundInput> {
    if sub.is_absent() {
        return Err(AppError::ValidationError("\"camp\" is required".to_string()));
    }

    let mut v = Violations::default();
    let title = v.text("camp.title", sub.title.as_ref());
    let price = v.number("camp.price", sub.price.as_ref());
    if matches!(price, Some(p) if p < 0.0) {
        v.push("camp.price", "must be greater than or equal to 0");
    }
    let image = v.text("camp.image", sub.image.as_ref());
    let location = v.text("camp.location", sub.location.as_ref());
    let description = v.text("camp.description", sub.description.as_ref());

    v.finish(CampgroundInput {
        title,
        location,
        image,
        description,
        price: price.unwrap_or_default(),
    })
}

/// Validates a review submission: non-blank body, whole-number rating 1 to 5.
pub fn validate_review(sub: &ReviewSubmission) -> Result<ReviewInput> {
    if sub.body.is_none() && sub.rating.is_none() {
        return Err(AppError::ValidationError("\"review\" is required".to_string()));
    }

    let mut v = Violations::default();
    let body = v.text("review.body", sub.body.as_ref());
    let mut rating = 0;
    if let Some(n) = v.number("review.rating", sub.rating.as_ref()) {
        if n.fract() != 0.0 {
            v.push("review.rating", "must be an integer");
        } else if n < 1.0 {
            v.push("review.rating", "must be greater than or equal to 1");
        } else if n > 5.0 {
            v.push("review.rating", "must be less than or equal to 5");
        } else {
            rating = n as u8;
        }
    }

    v.finish(ReviewInput { body, rating })
}
