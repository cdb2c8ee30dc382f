//! In-memory catalog held by the server between Sheets fetches.
//!
//! Every fetch takes a [`FetchTicket`] from a monotonically increasing
//! sequence before it starts. A finished fetch is applied only when its
//! ticket is newer than the last applied one, so a slow response can never
//! overwrite the result of a fetch that started after it.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use chrono::{DateTime, Utc};
use exmoon_core::{Catalog, Product};
use exmoon_sheets::{FetchError, SheetsClient};
use serde::Serialize;
use tokio::sync::RwLock;

/// Position of a fetch in the refresh sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Coarse catalog state reported by the health and refresh endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogStatus {
    Loading,
    Ready,
    Error,
    Unconfigured,
}

/// Point-in-time view of the store.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// Last successfully assembled catalog, if any fetch has succeeded.
    pub catalog: Option<Arc<Catalog>>,
    /// Error of the most recent applied fetch; cleared by the next success.
    pub last_error: Option<FetchError>,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn status(&self) -> CatalogStatus {
        match (&self.catalog, &self.last_error) {
            (Some(_), _) => CatalogStatus::Ready,
            (None, Some(_)) => CatalogStatus::Error,
            (None, None) => CatalogStatus::Loading,
        }
    }

    /// `true` when products are being served from an earlier fetch because
    /// the latest one failed.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.catalog.is_some() && self.last_error.is_some()
    }
}

#[derive(Debug, Default)]
struct Inner {
    snapshot: CatalogSnapshot,
    applied: u64,
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    sequence: AtomicU64,
    inner: RwLock<Inner>,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next ticket. Call before issuing the request.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Applies a finished fetch. Returns `false` when a newer fetch has
    /// already been applied and this result was discarded.
    ///
    /// On success the stored catalog is replaced wholesale; on failure the
    /// error is recorded and the previous products are kept.
    pub async fn apply(
        &self,
        ticket: FetchTicket,
        result: Result<Vec<Product>, FetchError>,
    ) -> bool {
        let mut inner = self.inner.write().await;
        if ticket.0 <= inner.applied {
            tracing::debug!(
                ticket = ticket.0,
                applied = inner.applied,
                "discarding superseded catalog fetch"
            );
            return false;
        }
        inner.applied = ticket.0;
        inner.snapshot.last_attempt_at = Some(Utc::now());

        match result {
            Ok(raw) => {
                let catalog = Catalog::from_raw(raw);
                tracing::info!(products = catalog.len(), "catalog updated");
                inner.snapshot.catalog = Some(Arc::new(catalog));
                inner.snapshot.last_error = None;
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    kind = ?error.kind(),
                    keeping_previous = inner.snapshot.catalog.is_some(),
                    "catalog fetch failed"
                );
                inner.snapshot.last_error = Some(error);
            }
        }
        true
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.inner.read().await.snapshot.clone()
    }
}

/// Fetches the catalog range once and applies the result to `store`.
pub async fn refresh_catalog(
    store: &CatalogStore,
    client: &SheetsClient,
    sheet_id: &str,
    range: &str,
) -> CatalogSnapshot {
    let ticket = store.begin();
    let result = client.fetch_products(sheet_id, range).await;
    store.apply(ticket, result).await;
    store.snapshot().await
}
