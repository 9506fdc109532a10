use bank::{Coordinates, DomainRecord};

use crate::models::SourceRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Existing record already had coordinates, nothing was looked up.
    SkippedCurated,
    Resolved,
    /// No coordinates this run. Carries whether the lookup errored.
    Unresolved { failed: bool },
}

/// Merges a source row into whatever the index already holds.
///
/// Precedence, highest first:
/// 1. a curated existing record is returned untouched;
/// 2. freshly resolved coordinates;
/// 3. coordinates already on the existing record, field by field;
/// 4. null.
///
/// `name` always comes from the source row. `city` keeps the stored value,
/// otherwise takes the row's locality hint, otherwise stays null. Fields the
/// index carries beyond these are kept as they are.
pub fn reconcile(
    existing: Option<&DomainRecord>,
    row: &SourceRow,
    resolved: Option<Coordinates>,
) -> DomainRecord {
    if let Some(curated) = existing.filter(|record| record.is_curated()) {
        return curated.clone();
    }

    let city = existing
        .and_then(|record| record.city.clone())
        .filter(|city| !city.is_empty())
        .or_else(|| Some(row.locality.trim().to_string()).filter(|hint| !hint.is_empty()));

    DomainRecord {
        name: row.name.clone(),
        lat: resolved
            .map(|c| c.lat)
            .or_else(|| existing.and_then(|record| record.lat)),
        lng: resolved
            .map(|c| c.lng)
            .or_else(|| existing.and_then(|record| record.lng)),
        city,
        extra: existing
            .map(|record| record.extra.clone())
            .unwrap_or_default(),
    }
}
