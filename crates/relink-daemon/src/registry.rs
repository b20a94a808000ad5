//! The redirect registry: semantic layer over the key-value store.
//!
//! Owns the `group:` naming scheme and the list display policy. Every
//! store path applies the prefix on the way in and strips it when
//! rendering identifiers back to the user.

use std::sync::Arc;

use relink_store::{KvStore, StoreError};

/// Namespace prefix for all redirect mapping keys.
pub const KEY_PREFIX: &str = "group:";

/// Hard ceiling on entries shown by `list`, independent of store size.
pub const LIST_DISPLAY_CAP: usize = 20;

/// Characters of target URL shown per list entry.
pub const TARGET_PREVIEW_CHARS: usize = 50;

/// Result of a list scan: resolved entries up to the display cap, plus
/// the total key count (which may exceed `entries.len()`).
#[derive(Debug, Clone)]
pub struct Listing {
    /// `(group id, target url)` pairs, at most [`LIST_DISPLAY_CAP`].
    pub entries: Vec<(String, String)>,
    /// Total number of mapping keys in the namespace.
    pub total: usize,
}

/// Translates between group identifiers and raw store keys.
pub struct RedirectRegistry {
    store: Arc<dyn KvStore>,
    base_url: String,
}

impl RedirectRegistry {
    pub fn new(store: Arc<dyn KvStore>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
        }
    }

    fn key(id: &str) -> String {
        format!("{KEY_PREFIX}{id}")
    }

    /// The public-facing redirect link for a group identifier.
    pub fn redirect_link(&self, id: &str) -> String {
        format!("{}/group/{}", self.base_url, id)
    }

    /// Write a mapping, replacing any prior value for the identifier.
    pub async fn set_mapping(&self, id: &str, url: &str) -> Result<(), StoreError> {
        self.store.set(&Self::key(id), url).await
    }

    /// Resolve an identifier to its target URL.
    pub async fn get_mapping(&self, id: &str) -> Result<Option<String>, StoreError> {
        self.store.get(&Self::key(id)).await
    }

    /// Delete a mapping. Succeeds whether or not it existed.
    pub async fn delete_mapping(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(&Self::key(id)).await
    }

    /// Scan the namespace and resolve up to [`LIST_DISPLAY_CAP`] entries.
    ///
    /// Key order is store-defined; callers must not assume any ordering.
    /// Keys that vanish between the scan and the get are skipped without
    /// reducing the reported total.
    pub async fn list_mappings(&self) -> Result<Listing, StoreError> {
        let keys = self.store.keys(&format!("{KEY_PREFIX}*")).await?;
        let total = keys.len();

        let mut entries = Vec::new();
        for key in keys.iter().take(LIST_DISPLAY_CAP) {
            if let Some(target) = self.store.get(key).await? {
                let id = key.strip_prefix(KEY_PREFIX).unwrap_or(key).to_string();
                entries.push((id, target));
            }
        }

        Ok(Listing { entries, total })
    }
}

/// First [`TARGET_PREVIEW_CHARS`] characters of a target URL.
fn preview(url: &str) -> String {
    url.chars().take(TARGET_PREVIEW_CHARS).collect()
}

/// Render a listing for display.
///
/// Every entry's target gets a trailing `...` after its preview, whether
/// or not it was actually truncated. A trailing line reports the count of
/// entries beyond the display cap.
pub fn render_listing(listing: &Listing) -> String {
    let mut message = String::from("📋 *Active Redirects:*\n\n");
    for (id, target) in &listing.entries {
        message.push_str(&format!("• `/group/{id}` → {}...\n", preview(target)));
    }
    if listing.total > LIST_DISPLAY_CAP {
        message.push_str(&format!("\n_... and {} more_", listing.total - LIST_DISPLAY_CAP));
    }
    message
}
