use std::io;
use std::path::Path;

/// Make sure the directory holding a database file exists.
pub(crate) fn prepare_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
