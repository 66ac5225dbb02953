//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Campground, CampgroundInput, Flash, Review, SessionId};

/// Data persistence contract for campgrounds and their reviews.
#[async_trait]
pub trait CampgroundRepo: Send + Sync {
    // Campground Operations
    async fn list_campgrounds(&self) -> anyhow::Result<Vec<Campground>>;
    async fn get_campground(&self, id: Uuid) -> anyhow::Result<Option<Campground>>;
    /// Fetches a campground with its review ids resolved into full reviews.
    async fn get_campground_with_reviews(&self, id: Uuid) -> anyhow::Result<Option<(Campground, Vec<Review>)>>;
    async fn create_campground(&self, campground: &Campground) -> anyhow::Result<()>;
    /// Overwrites every editable field. `None` when the id does not exist.
    async fn update_campground(&self, id: Uuid, input: CampgroundInput) -> anyhow::Result<Option<Campground>>;
    /// Deletes the campground and its reviews. `false` when nothing was deleted.
    async fn delete_campground(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Removes every campground and review. Returns the number of campgrounds removed.
    async fn clear_campgrounds(&self) -> anyhow::Result<u64>;

    // Review Operations
    /// Stores the review and appends it to the campground in one unit.
    /// `false` when the campground does not exist (nothing is stored).
    async fn add_review(&self, campground_id: Uuid, review: &Review) -> anyhow::Result<bool>;
    /// Deletes a review that belongs to the campground. `false` when it is not a member.
    async fn remove_review(&self, campground_id: Uuid, review_id: Uuid) -> anyhow::Result<bool>;
}

/// Per-visitor session contract: signed ids plus one-shot flash messages.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Starts a new session and returns its id with the signed cookie token.
    fn issue(&self) -> (SessionId, String);

    /// Resolves a cookie token, rejecting anything with a bad signature.
    fn resolve(&self, token: &str) -> Option<SessionId>;

    /// Queues a flash for the next rendered page of this session.
    async fn push_flash(&self, session: SessionId, flash: Flash) -> anyhow::Result<()>;

    /// Drains the pending flashes of this session.
    async fn take_flashes(&self, session: SessionId) -> anyhow::Result<Vec<Flash>>;
}
