//! Item name extraction from raw client text.

use std::sync::LazyLock;

use notemark_types::ItemId;
use regex::Regex;

use crate::host::ItemCatalog;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));

/// Strip client markup tags (`<col=ff0000>`, `</col>`, ...) and surrounding whitespace.
pub fn sanitize(raw: &str) -> String {
    MARKUP_TAG.replace_all(raw, "").trim().to_string()
}

/// First catalog entry whose name equals `name`, ignoring case.
pub fn lookup_exact(catalog: &impl ItemCatalog, name: &str) -> Option<ItemId> {
    if name.is_empty() {
        return None;
    }

    let lowered = name.to_lowercase();
    catalog
        .search(name)
        .into_iter()
        .find(|item| item.id > 0 && item.name.to_lowercase() == lowered)
        .map(|item| item.id)
}

/// Sanitize `raw` and resolve it to an item id.
pub fn item_id_from_text(catalog: &impl ItemCatalog, raw: &str) -> Option<ItemId> {
    lookup_exact(catalog, &sanitize(raw))
}
