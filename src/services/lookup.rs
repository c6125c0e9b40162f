use slug::slugify;
use thiserror::Error;
use uuid::Uuid;

use crate::models::store::{Collection, Record};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("'{0}' not found")]
    NotFound(String),

    #[error("'{0}' is ambiguous. Multiple matches: {list}", list = .1.join(", "))]
    Ambiguous(String, Vec<String>),
}

/// Resolve a shell reference to a record id: exact slug match first,
/// then case-insensitive substring match over display labels.
pub fn resolve<T: Record>(records: &Collection<T>, reference: &str) -> Result<Uuid, LookupError> {
    let reference = reference.trim();
    let slug_needle = slugify(reference);
    if let Some(record) = records.iter().find(|r| r.slug() == slug_needle) {
        return Ok(record.id());
    }

    let needle = reference.to_lowercase();
    let matches: Vec<&T> = records
        .iter()
        .filter(|r| r.label().to_lowercase().contains(&needle))
        .collect();

    match matches.len() {
        0 => Err(LookupError::NotFound(reference.to_string())),
        1 => Ok(matches[0].id()),
        _ => Err(LookupError::Ambiguous(
            reference.to_string(),
            matches.iter().map(|r| r.label().to_string()).collect(),
        )),
    }
}
