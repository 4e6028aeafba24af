//! Whether a deployment may fall back to the default local store.

use crate::resolver::clean_raw;
use crate::{DbError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UrlPolicy {
    /// Blank input resolves to the default SQLite file.
    #[default]
    Permissive,
    /// Blank input is a startup error.
    Required,
}

impl UrlPolicy {
    pub fn from_required(required: bool) -> Self {
        if required {
            UrlPolicy::Required
        } else {
            UrlPolicy::Permissive
        }
    }
}

/// Reject a missing connection string when the policy demands one.
///
/// Blankness is judged the same way the resolver judges it, so quoted
/// whitespace counts as missing.
pub fn require_database_url(raw: Option<&str>, policy: UrlPolicy) -> Result<()> {
    let present = raw.is_some_and(|s| !clean_raw(s).is_empty());
    match policy {
        UrlPolicy::Required if !present => Err(DbError::MissingDatabaseUrl),
        _ => Ok(()),
    }
}
