//! # yc-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational model
//! and the `yc-core` domain models. A campground's ordered review list is the
//! set of `reviews` rows pointing at it, ordered by `seq`.

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Executor, Row, Sqlite};
use uuid::Uuid;
use yc_core::models::{Campground, CampgroundInput, Review};
use yc_core::traits::CampgroundRepo;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const CAMPGROUND_COLUMNS: &str = "id, title, location, image, description, price, created_at";

#[derive(Clone)]
pub struct SqliteCampgroundRepo {
    pool: SqlitePool,
}

impl SqliteCampgroundRepo {
    /// Opens the database with a default pool size and applies migrations.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        Self::connect(url, 5).await
    }

    /// Opens (creating if missing) the database at `url` and applies migrations.
    ///
    /// In-memory databases are pinned to a single connection that never
    /// expires, since each SQLite connection would otherwise see its own
    /// empty database.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url `{url}`"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open database `{url}`"))?;

        MIGRATOR.run(&pool).await.context("failed to apply migrations")?;
        log::info!("Connected to {url}");

        Ok(Self { pool })
    }

    /// Closes every pooled connection; call once the server has stopped.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// Helper for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> anyhow::Result<Uuid> {
    Uuid::from_slice(blob).context("malformed id column")
}

fn campground_from_row(row: &SqliteRow) -> anyhow::Result<Campground> {
    Ok(Campground {
        id: blob_to_uuid(&row.try_get::<Vec<u8>, _>("id")?)?,
        title: row.try_get("title")?,
        location: row.try_get("location")?,
        image: row.try_get("image")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        reviews: Vec::new(),
        created_at: row.try_get("created_at")?,
    })
}

fn review_from_row(row: &SqliteRow) -> anyhow::Result<Review> {
    Ok(Review {
        id: blob_to_uuid(&row.try_get::<Vec<u8>, _>("id")?)?,
        body: row.try_get("body")?,
        rating: u8::try_from(row.try_get::<i64, _>("rating")?).context("rating out of range")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Review ids of one campground in insertion order.
async fn review_ids<'e, E>(executor: E, campground_id: Uuid) -> anyhow::Result<Vec<Uuid>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("SELECT id FROM reviews WHERE campground_id = ? ORDER BY seq ASC")
        .bind(uuid_to_blob(campground_id))
        .fetch_all(executor)
        .await?
        .iter()
        .map(|row| blob_to_uuid(&row.try_get::<Vec<u8>, _>("id")?))
        .collect()
}

#[async_trait]
impl CampgroundRepo for SqliteCampgroundRepo {
    async fn list_campgrounds(&self) -> anyhow::Result<Vec<Campground>> {
        let rows = sqlx::query(&format!(
            "SELECT {CAMPGROUND_COLUMNS} FROM campgrounds ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut membership: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in sqlx::query("SELECT id, campground_id FROM reviews ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?
        {
            let parent = blob_to_uuid(&row.try_get::<Vec<u8>, _>("campground_id")?)?;
            let id = blob_to_uuid(&row.try_get::<Vec<u8>, _>("id")?)?;
            membership.entry(parent).or_default().push(id);
        }

        rows.iter()
            .map(|row| -> anyhow::Result<Campground> {
                let mut camp = campground_from_row(row)?;
                camp.reviews = membership.remove(&camp.id).unwrap_or_default();
                Ok(camp)
            })
            .collect()
    }

    async fn get_campground(&self, id: Uuid) -> anyhow::Result<Option<Campground>> {
        let row = sqlx::query(&format!("SELECT {CAMPGROUND_COLUMNS} FROM campgrounds WHERE id = ?"))
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut camp = campground_from_row(&row)?;
        camp.reviews = review_ids(&self.pool, id).await?;
        Ok(Some(camp))
    }

    /// Retrieves a campground and all its reviews in a single logical operation.
    async fn get_campground_with_reviews(&self, id: Uuid) -> anyhow::Result<Option<(Campground, Vec<Review>)>> {
        let Some(mut camp) = self.get_campground(id).await? else {
            return Ok(None);
        };

        let reviews = sqlx::query(
            "SELECT id, body, rating, created_at FROM reviews WHERE campground_id = ? ORDER BY seq ASC",
        )
        .bind(uuid_to_blob(id))
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(review_from_row)
        .collect::<anyhow::Result<Vec<_>>>()?;

        camp.reviews = reviews.iter().map(|r| r.id).collect();
        Ok(Some((camp, reviews)))
    }

    async fn create_campground(&self, campground: &Campground) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO campgrounds (id, title, location, image, description, price, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)")
            .bind(uuid_to_blob(campground.id))
            .bind(&campground.title)
            .bind(&campground.location)
            .bind(&campground.image)
            .bind(&campground.description)
            .bind(campground.price)
            .bind(campground.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_campground(&self, id: Uuid, input: CampgroundInput) -> anyhow::Result<Option<Campground>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!("SELECT {CAMPGROUND_COLUMNS} FROM campgrounds WHERE id = ?"))
            .bind(uuid_to_blob(id))
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut camp = campground_from_row(&row)?;
        camp.apply(input);

        sqlx::query("UPDATE campgrounds SET title = ?, location = ?, image = ?, description = ?, price = ? WHERE id = ?")
            .bind(&camp.title)
            .bind(&camp.location)
            .bind(&camp.image)
            .bind(&camp.description)
            .bind(camp.price)
            .bind(uuid_to_blob(id))
            .execute(&mut *tx)
            .await?;

        camp.reviews = review_ids(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(Some(camp))
    }

    /// Removes the campground together with its reviews.
    ///
    /// # Developer Note
    /// The reviews are deleted explicitly inside the transaction rather than
    /// relying on `ON DELETE CASCADE`, so a connection opened without foreign
    /// key enforcement still leaves no orphans behind.
    async fn delete_campground(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reviews WHERE campground_id = ?")
            .bind(uuid_to_blob(id))
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM campgrounds WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }

    async fn clear_campgrounds(&self) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM reviews").execute(&mut *tx).await?;
        let removed = sqlx::query("DELETE FROM campgrounds")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        Ok(removed)
    }

    /// Atomic operation to store a review and attach it to its campground.
    async fn add_review(&self, campground_id: Uuid, review: &Review) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;

        let parent = sqlx::query("SELECT 1 FROM campgrounds WHERE id = ?")
            .bind(uuid_to_blob(campground_id))
            .fetch_optional(&mut *tx)
            .await?;
        if parent.is_none() {
            return Ok(false);
        }

        sqlx::query("INSERT INTO reviews (id, campground_id, body, rating, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(uuid_to_blob(review.id))
            .bind(uuid_to_blob(campground_id))
            .bind(&review.body)
            .bind(i64::from(review.rating))
            .bind(review.created_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn remove_review(&self, campground_id: Uuid, review_id: Uuid) -> anyhow::Result<bool> {
        let deleted = sqlx::query("DELETE FROM reviews WHERE id = ? AND campground_id = ?")
            .bind(uuid_to_blob(review_id))
            .bind(uuid_to_blob(campground_id))
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}
