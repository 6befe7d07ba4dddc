//! Database query projecting stored transactions into catalog entries.

use rusqlite::Connection;

use crate::{Error, catalog::summary::CatalogEntry};

/// Project every stored transaction into the shape consumed by
/// [summarize_catalog](crate::catalog::summarize_catalog).
///
/// Only the columns the summarizer needs are selected. Rows with tag data
/// that does not parse as a JSON array project to an empty tag list rather
/// than failing the whole query.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidTransactionKind] if a stored kind string is not recognized,
/// - or [Error::SqlError] if there is some other SQL error.
pub(crate) fn get_catalog_entries(connection: &Connection) -> Result<Vec<CatalogEntry>, Error> {
    connection
        .prepare("SELECT profile, currency, kind, tags FROM \"transaction\";")?
        .query_map([], |row| {
            let profile: String = row.get(0)?;
            let currency: String = row.get(1)?;
            let raw_kind: String = row.get(2)?;
            let raw_tags: String = row.get(3)?;

            Ok((profile, currency, raw_kind, raw_tags))
        })?
        .map(|maybe_row| {
            let (profile, currency, raw_kind, raw_tags) = maybe_row.map_err(Error::SqlError)?;
            let kind = raw_kind.parse()?;
            let tags = serde_json::from_str(&raw_tags).unwrap_or_default();

            Ok(CatalogEntry {
                profile,
                currency,
                kind,
                tags,
            })
        })
        .collect()
}
