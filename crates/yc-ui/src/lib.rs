//! # yc-ui
//!
//! Askama view models. Every page extends `layout.html`, which renders the
//! page title and any pending flash messages.

use askama::Template;
use yc_core::models::{Campground, Flash, Review};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub title: &'a str,
    pub flashes: &'a [Flash],
}

#[derive(Template)]
#[template(path = "campgrounds/index.html")]
pub struct CampgroundListTemplate<'a> {
    pub title: &'a str,
    pub flashes: &'a [Flash],
    pub campgrounds: &'a [Campground],
}

#[derive(Template)]
#[template(path = "campgrounds/new.html")]
pub struct NewCampgroundTemplate<'a> {
    pub title: &'a str,
    pub flashes: &'a [Flash],
}

#[derive(Template)]
#[template(path = "campgrounds/edit.html")]
pub struct EditCampgroundTemplate<'a> {
    pub title: &'a str,
    pub flashes: &'a [Flash],
    pub campground: &'a Campground,
}

#[derive(Template)]
#[template(path = "campgrounds/show.html")]
pub struct ShowCampgroundTemplate<'a> {
    pub title: &'a str,
    pub flashes: &'a [Flash],
    pub campground: &'a Campground,
    pub reviews: &'a [Review],
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub title: &'a str,
    pub flashes: &'a [Flash],
    pub status: u16,
    pub message: &'a str,
}
