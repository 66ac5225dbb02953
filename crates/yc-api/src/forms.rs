//! URL-encoded form payloads, named the way the templates post them
//! (`camp[title]`, `review[body]`, ...).

use serde::Deserialize;
use yc_core::validation::{CampgroundSubmission, ReviewSubmission};

#[derive(Debug, Default, Deserialize)]
pub struct CampgroundForm {
    #[serde(rename = "camp[title]")]
    pub title: Option<String>,
    #[serde(rename = "camp[price]")]
    pub price: Option<String>,
    #[serde(rename = "camp[image]")]
    pub image: Option<String>,
    #[serde(rename = "camp[location]")]
    pub location: Option<String>,
    #[serde(rename = "camp[description]")]
    pub description: Option<String>,
}

impl From<CampgroundForm> for CampgroundSubmission {
    fn from(form: CampgroundForm) -> Self {
        Self {
            title: form.title,
            price: form.price,
            image: form.image,
            location: form.location,
            description: form.description,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewForm {
    #[serde(rename = "review[body]")]
    pub body: Option<String>,
    #[serde(rename = "review[rating]")]
    pub rating: Option<String>,
}

impl From<ReviewForm> for ReviewSubmission {
    fn from(form: ReviewForm) -> Self {
        Self {
            body: form.body,
            rating: form.rating,
        }
    }
}
