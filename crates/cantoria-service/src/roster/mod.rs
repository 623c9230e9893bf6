//! The musician roster: musicians with their notes and suggestions.

pub mod musician;
pub mod note;
pub mod suggestion;

use std::collections::BTreeMap;

/// ## Summary
/// Groups records by owning musician. Records keep their input order
/// within each group.
#[must_use]
pub fn group_by_musician<T, F>(records: Vec<T>, owner: F) -> BTreeMap<uuid::Uuid, Vec<T>>
where
    F: Fn(&T) -> uuid::Uuid,
{
    let mut grouped: BTreeMap<uuid::Uuid, Vec<T>> = BTreeMap::new();
    for record in records {
        grouped.entry(owner(&record)).or_default().push(record);
    }
    grouped
}
