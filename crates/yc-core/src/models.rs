//! # Domain Models
//!
//! These structs represent the core entities of Yelp-Camp.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A listed campground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campground {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    /// URL of the cover image
    pub image: String,
    pub description: String,
    /// Nightly price, never negative
    pub price: f64,
    /// Review ids in insertion order
    pub reviews: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Campground {
    /// Builds a fresh campground (no reviews yet) from validated input.
    pub fn new(input: CampgroundInput) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            location: input.location,
            image: input.image,
            description: input.description,
            price: input.price,
            reviews: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Replaces every editable field with the submitted values.
    pub fn apply(&mut self, input: CampgroundInput) {
        self.title = input.title;
        self.location = input.location;
        self.image = input.image;
        self.description = input.description;
        self.price = input.price;
    }
}

/// Validated campground fields, as produced by [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampgroundInput {
    pub title: String,
    pub location: String,
    pub image: String,
    pub description: String,
    pub price: f64,
}

/// Feedback left on exactly one campground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub body: String,
    /// 1 to 5 stars
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(input: ReviewInput) -> Self {
        Self {
            id: Uuid::now_v7(),
            body: input.body,
            rating: input.rating,
            created_at: Utc::now(),
        }
    }
}

/// Validated review fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewInput {
    pub body: String,
    pub rating: u8,
}

/// Opaque identifier of a browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashKind {
    Success,
    Error,
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }

    /// CSS modifier used by the layout's flash banner.
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "flash-success",
            FlashKind::Error => "flash-error",
        }
    }
}
