//! Rendered phone-ID reference for prompt construction.
//!
//! The dialogue layer embeds a "phone name | id" table in its instructions
//! so the model calls tools with exact ids. The rendered text is the only
//! thing cached anywhere in this layer; records themselves are always
//! fetched fresh.

use std::sync::Arc;

use parking_lot::RwLock;

use shop_agent_core::PhoneStore;

const DEFAULT_MAX_ENTRIES: usize = 200;
const NAME_WIDTH: usize = 36;

/// Cache of the rendered reference table, owned by the dialogue-layer
/// collaborator and passed by reference where needed.
pub struct PhoneReferenceCache {
    store: Arc<dyn PhoneStore>,
    max_entries: usize,
    rendered: RwLock<Option<String>>,
}

impl PhoneReferenceCache {
    pub fn new(store: Arc<dyn PhoneStore>) -> Self {
        Self::with_max_entries(store, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(store: Arc<dyn PhoneStore>, max_entries: usize) -> Self {
        Self {
            store,
            max_entries,
            rendered: RwLock::new(None),
        }
    }

    /// Cached reference text, building it on first use.
    pub async fn get(&self) -> String {
        if let Some(text) = self.rendered.read().clone() {
            return text;
        }
        let text = self.build().await;
        *self.rendered.write() = Some(text.clone());
        text
    }

    /// Drop the cached text so the next `get` rebuilds it.
    pub fn invalidate(&self) {
        *self.rendered.write() = None;
    }

    async fn build(&self) -> String {
        let phones = match self.store.fetch_all().await {
            Ok(phones) => phones,
            Err(err) => {
                tracing::warn!(error = %err, "failed to build phone reference");
                return "Phone ID reference could not be loaded (error fetching the catalog). \
                        Use the `list_all_phones` tool to confirm IDs before calling other tools."
                    .to_string();
            }
        };

        if phones.is_empty() {
            return "No phones are currently loaded from the catalog store. Use \
                    `list_all_phones` to verify the catalog before making tool calls."
                .to_string();
        }

        let mut lines = vec![
            "When calling tools, use the exact `id` from this mapping. For additional phones, \
             run `list_all_phones`."
                .to_string(),
            String::new(),
            "phone name | id".to_string(),
            "---------- | --".to_string(),
        ];

        for phone in phones.iter().take(self.max_entries) {
            let display = if phone.phone_name.is_empty() {
                phone.id.clone()
            } else {
                shorten(&phone.phone_name, NAME_WIDTH)
            };
            lines.push(format!("{display} | {}", phone.id));
        }

        if phones.len() > self.max_entries {
            let remaining = phones.len() - self.max_entries;
            lines.push(format!(
                "...and {remaining} more phones. Call `list_all_phones` for the full list."
            ));
        }

        lines.join("\n")
    }
}

/// Truncate to `width` characters with a trailing ellipsis marker.
fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_agent_catalog::StaticStore;
    use shop_agent_core::CatalogRecord;

    fn record(id: &str, name: &str) -> CatalogRecord {
        CatalogRecord {
            id: id.to_string(),
            phone_name: name.to_string(),
            ..CatalogRecord::default()
        }
    }

    #[tokio::test]
    async fn test_reference_lists_names_and_ids() {
        let store = Arc::new(StaticStore::new(vec![
            record("pixel-8a", "Google Pixel 8a"),
            record("iphone-15", "Apple iPhone 15"),
        ]));
        let cache = PhoneReferenceCache::new(store);

        let text = cache.get().await;
        assert!(text.contains("phone name | id"));
        assert!(text.contains("Google Pixel 8a | pixel-8a"));
        assert!(text.contains("Apple iPhone 15 | iphone-15"));
    }

    #[tokio::test]
    async fn test_overflow_entries_get_a_footer() {
        let records = (0..5)
            .map(|i| record(&format!("phone-{i}"), &format!("Phone {i}")))
            .collect();
        let cache = PhoneReferenceCache::with_max_entries(Arc::new(StaticStore::new(records)), 3);

        let text = cache.get().await;
        assert!(text.contains("Phone 2 | phone-2"));
        assert!(!text.contains("phone-3"));
        assert!(text.contains("...and 2 more phones"));
    }

    #[tokio::test]
    async fn test_empty_catalog_has_fallback_text() {
        let cache = PhoneReferenceCache::new(Arc::new(StaticStore::new(Vec::new())));
        let text = cache.get().await;
        assert!(text.contains("No phones are currently loaded"));
    }

    #[tokio::test]
    async fn test_invalidate_forces_rebuild() {
        let store = Arc::new(StaticStore::new(vec![record("pixel-8a", "Google Pixel 8a")]));
        let cache = PhoneReferenceCache::new(store);

        let first = cache.get().await;
        cache.invalidate();
        let second = cache.get().await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_long_names_are_shortened() {
        let name = "A Phone With An Extremely Long Marketing Name Edition";
        let short = shorten(name, 36);
        assert!(short.chars().count() <= 36);
        assert!(short.ends_with("..."));
    }
}
