//! SQLite-specific helpers: file location and on-disk preparation.

mod path;

use std::path::PathBuf;

use crate::resolver::QueryParams;

pub(crate) use path::prepare_parent_dir;

/// Where a local store keeps its data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqliteFile {
    Memory,
    Path(PathBuf),
}

impl SqliteFile {
    pub fn is_memory(&self) -> bool {
        matches!(self, SqliteFile::Memory)
    }
}

/// Interpret the part after `sqlite:`.
///
/// `///rel.db` is relative, `////abs.db` is absolute, `//dir/x.db` and
/// `x.db` are relative. `:memory:`, an empty path, or `mode=memory` select
/// an in-memory database.
pub(crate) fn parse_file(target: &str, query: &QueryParams) -> SqliteFile {
    if query
        .get("mode")
        .is_some_and(|m| m.eq_ignore_ascii_case("memory"))
    {
        return SqliteFile::Memory;
    }

    let path = match target.strip_prefix("//") {
        // Authority form; the authority is empty for file stores.
        Some(rest) => rest.strip_prefix('/').unwrap_or(rest),
        None => target,
    };

    if path.is_empty() || path == ":memory:" || path == "memory:" {
        SqliteFile::Memory
    } else {
        SqliteFile::Path(PathBuf::from(path))
    }
}

/// Open flags taken from the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct OpenFlags {
    pub read_only: bool,
    pub shared_cache: bool,
    /// Keys the driver does not act on, in query order.
    pub ignored: Vec<String>,
}

/// Map `mode` and `cache` onto driver options. `mode=memory` is handled by
/// [`parse_file`]; `rw` and `rwc` match the default open mode.
pub(crate) fn open_flags(query: &QueryParams) -> OpenFlags {
    let mut flags = OpenFlags::default();
    for (key, value) in query.iter() {
        match (key, value.to_ascii_lowercase().as_str()) {
            ("mode", "ro") => flags.read_only = true,
            ("mode", "rw" | "rwc" | "memory") => {}
            ("cache", "shared") => flags.shared_cache = true,
            ("cache", "private") => {}
            _ => flags.ignored.push(format!("{key}={value}")),
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(target: &str) -> SqliteFile {
        parse_file(target, &QueryParams::default())
    }

    #[test]
    fn triple_slash_is_relative() {
        assert_eq!(file("///./data.db"), SqliteFile::Path("./data.db".into()));
        assert_eq!(file("///app.db"), SqliteFile::Path("app.db".into()));
    }

    #[test]
    fn quadruple_slash_is_absolute() {
        assert_eq!(
            file("////var/lib/app.db"),
            SqliteFile::Path("/var/lib/app.db".into())
        );
    }

    #[test]
    fn bare_and_authority_forms() {
        assert_eq!(file("data.db"), SqliteFile::Path("data.db".into()));
        assert_eq!(
            file("//database/catalog.db"),
            SqliteFile::Path("database/catalog.db".into())
        );
    }

    #[test]
    fn memory_forms() {
        assert!(file(":memory:").is_memory());
        assert!(file("//:memory:").is_memory());
        assert!(file("//").is_memory());
        assert!(file("").is_memory());
        assert!(parse_file("///x.db", &QueryParams::parse("mode=Memory")).is_memory());
    }

    #[test]
    fn mode_and_cache_become_open_flags() {
        let flags = open_flags(&QueryParams::parse("mode=ro&cache=shared"));
        assert!(flags.read_only);
        assert!(flags.shared_cache);
        assert!(flags.ignored.is_empty());
    }

    #[test]
    fn unknown_params_are_reported() {
        let flags = open_flags(&QueryParams::parse("mode=memory&foo=1&cache=bogus"));
        assert!(!flags.read_only);
        assert!(!flags.shared_cache);
        assert_eq!(flags.ignored, vec!["foo=1", "cache=bogus"]);
    }
}
