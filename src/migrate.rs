//! Legacy placement normalization.
//!
//! Stored page records have gone through two schemas:
//!
//! ```text
//! old:  { "displayLocation": "before-packages", ... }
//! new:  { "placement": "before_packages", ... }
//! ```
//!
//! and some `placement` values were written kebab-cased. This module runs once
//! per load, before anything deserializes a [`Page`], and rewrites every record
//! into the canonical shape:
//!
//! 1. A `placement` value is normalized by replacing `-` with `_`. If the result
//!    names a slot, it wins.
//! 2. Otherwise `displayLocation` is looked up in [`LEGACY_LOCATIONS`]. A hit
//!    becomes the new `placement` and the legacy key is dropped.
//! 3. Anything else leaves the page unplaced. Unmapped legacy values are logged
//!    so the administrator can find them; the page is still loaded.
//!
//! Records whose placement did not change are returned untouched so the caller
//! can skip a write when nothing moved. Persisting is the caller's job, see
//! [`crate::store::load_pages`].

use crate::types::{Page, Placement};
use log::warn;
use serde_json::Value;

/// Old `displayLocation` values and the slot each one maps to.
pub const LEGACY_LOCATIONS: [(&str, Placement); 7] = [
    ("after-header", Placement::AfterHeader),
    ("after-services", Placement::AfterServices),
    ("after-team", Placement::AfterTeam),
    ("after-work", Placement::AfterWork),
    ("before-footer", Placement::BeforeFooter),
    ("before-packages", Placement::BeforePackages),
    ("before-work", Placement::BeforeWork),
];

const PLACEMENT_KEY: &str = "placement";
const LEGACY_KEY: &str = "displayLocation";

/// Result of normalizing a stored page array.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Canonical records, suitable for writing back to the store.
    pub records: Vec<Value>,
    /// Pages parsed from `records`; unparseable records are skipped.
    pub pages: Vec<Page>,
    /// True when at least one record's placement was rewritten.
    pub did_migrate: bool,
}

/// Look up an old `displayLocation` value.
pub fn legacy_placement(display_location: &str) -> Option<Placement> {
    LEGACY_LOCATIONS
        .iter()
        .find(|(legacy, _)| *legacy == display_location)
        .map(|(_, placement)| *placement)
}

/// Normalize a stored `placement` string, tolerating kebab-case.
pub fn canonical_placement(raw: &str) -> Option<Placement> {
    Placement::parse(&raw.trim().replace('-', "_"))
}

/// Rewrite one record. Returns the record and whether it changed.
pub fn normalize_record(mut record: Value) -> (Value, bool) {
    let Some(fields) = record.as_object_mut() else {
        return (record, false);
    };

    let stored = fields.get(PLACEMENT_KEY).and_then(Value::as_str);
    let legacy = fields.get(LEGACY_KEY).and_then(Value::as_str);

    let current = stored.and_then(canonical_placement);
    let from_legacy = match (current, legacy) {
        (None, Some(location)) => {
            let mapped = legacy_placement(location);
            if mapped.is_none() {
                let id = fields.get("id").and_then(Value::as_str).unwrap_or("?");
                warn!("page {id}: unknown displayLocation {location:?}, page left unplaced");
            }
            mapped
        }
        _ => None,
    };
    let derived = current.or(from_legacy);

    if derived.map(Placement::as_str) == stored {
        return (record, false);
    }

    match derived {
        Some(placement) => {
            fields.insert(PLACEMENT_KEY.into(), Value::from(placement.as_str()));
            if from_legacy.is_some() {
                fields.remove(LEGACY_KEY);
            }
        }
        None => {
            // Only reachable when a stored string named no slot.
            fields.remove(PLACEMENT_KEY);
        }
    }
    (record, true)
}

/// Normalize every record's placement.
pub fn normalize_placements(records: Vec<Value>) -> (Vec<Value>, bool) {
    let mut did_migrate = false;
    let records = records
        .into_iter()
        .map(|record| {
            let (record, changed) = normalize_record(record);
            did_migrate |= changed;
            record
        })
        .collect();
    (records, did_migrate)
}

/// Deserialize canonical records into pages, skipping any that fail.
pub fn parse_pages(records: &[Value]) -> Vec<Page> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Page>(record.clone()) {
            Ok(page) => Some(page),
            Err(e) => {
                let id = record.get("id").and_then(Value::as_str).unwrap_or("?");
                warn!("skipping custom page #{index} ({id}): {e}");
                None
            }
        })
        .collect()
}

/// Normalize and parse a stored page array.
pub fn normalize(records: Vec<Value>) -> Normalized {
    let (records, did_migrate) = normalize_placements(records);
    let pages = parse_pages(&records);
    Normalized {
        records,
        pages,
        did_migrate,
    }
}
