//! # yc-session-memory
//!
//! In-process implementation of `SessionStore`.
//! Session ids travel in a cookie as `<uuid>.<hex HMAC-SHA256>`; pending flash
//! messages live in a concurrent map and are dropped once read, or once they
//! have waited longer than the store's TTL.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;
use yc_core::models::{Flash, SessionId};
use yc_core::traits::SessionStore;

type HmacSha256 = Hmac<Sha256>;

/// How long unread flashes are kept when no TTL is configured.
pub const DEFAULT_FLASH_TTL: Duration = Duration::from_secs(600);

struct PendingFlashes {
    /// Refreshed on every push
    touched: Instant,
    flashes: Vec<Flash>,
}

pub struct MemorySessionStore {
    /// Keyed MAC, cloned for every sign/verify
    mac: HmacSha256,
    flashes: DashMap<SessionId, PendingFlashes>,
    ttl: Duration,
}

impl MemorySessionStore {
    /// Accepts the signing secret (e.g., from configuration).
    pub fn new(secret: &str) -> anyhow::Result<Self> {
        Self::with_ttl(secret, DEFAULT_FLASH_TTL)
    }

    /// Like [`MemorySessionStore::new`], dropping unread flashes after `ttl`.
    pub fn with_ttl(secret: &str, ttl: Duration) -> anyhow::Result<Self> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| anyhow::anyhow!("session secret has an unusable length"))?;
        Ok(Self {
            mac,
            flashes: DashMap::new(),
            ttl,
        })
    }

    /// Drops every queue that has waited longer than the TTL. Returns how
    /// many sessions were evicted.
    pub fn evict_expired(&self) -> usize {
        let before = self.flashes.len();
        self.flashes.retain(|_, pending| pending.touched.elapsed() <= self.ttl);
        let evicted = before.saturating_sub(self.flashes.len());
        if evicted > 0 {
            log::debug!("evicted {evicted} stale flash queues");
        }
        evicted
    }

    fn sign(&self, id: &SessionId) -> String {
        let mut mac = self.mac.clone();
        mac.update(id.0.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Number of sessions with unread flashes.
    pub fn pending_sessions(&self) -> usize {
        self.flashes.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    fn issue(&self) -> (SessionId, String) {
        let id = SessionId::generate();
        let token = format!("{}.{}", id, self.sign(&id));
        (id, token)
    }

    fn resolve(&self, token: &str) -> Option<SessionId> {
        let (raw_id, raw_sig) = token.split_once('.')?;
        let id = SessionId(Uuid::parse_str(raw_id).ok()?);
        let sig = hex::decode(raw_sig).ok()?;

        let mut mac = self.mac.clone();
        mac.update(id.0.as_bytes());
        mac.verify_slice(&sig).ok()?;
        Some(id)
    }

    async fn push_flash(&self, session: SessionId, flash: Flash) -> anyhow::Result<()> {
        self.evict_expired();
        let mut pending = self.flashes.entry(session).or_insert_with(|| PendingFlashes {
            touched: Instant::now(),
            flashes: Vec::new(),
        });
        pending.touched = Instant::now();
        pending.flashes.push(flash);
        Ok(())
    }

    async fn take_flashes(&self, session: SessionId) -> anyhow::Result<Vec<Flash>> {
        Ok(self
            .flashes
            .remove(&session)
            .filter(|(_, pending)| pending.touched.elapsed() <= self.ttl)
            .map(|(_, pending)| pending.flashes)
            .unwrap_or_default())
    }
}
