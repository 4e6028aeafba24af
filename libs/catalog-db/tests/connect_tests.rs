//! Connecting through resolved descriptors and the lazy handle.

#![cfg(feature = "sqlite")]

use std::sync::Arc;

use catalog_db::{resolve, DbError, DbHandle, LazyDb, SqliteFile};
use tempfile::TempDir;

#[tokio::test]
async fn in_memory_sqlite_connects_and_pings() {
    let handle = DbHandle::connect(&resolve(Some("sqlite::memory:")))
        .await
        .unwrap();
    assert_eq!(handle.ping().await.unwrap(), 1);
    handle.close().await;
}

#[tokio::test]
async fn absolute_sqlite_path_creates_file_and_parents() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("catalog.db");
    let url = format!("sqlite:///{}", db_path.display());

    let resolved = resolve(Some(&url));
    assert_eq!(
        resolved.descriptor.sqlite_file(),
        Some(SqliteFile::Path(db_path.clone()))
    );

    let handle = DbHandle::connect(&resolved).await.unwrap();
    handle.ping().await.unwrap();
    assert!(db_path.exists(), "expected {db_path:?} to exist");
}

#[tokio::test]
async fn read_only_mode_is_honored() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("catalog.db");
    let url = format!("sqlite:///{}", db_path.display());

    let writer = DbHandle::connect(&resolve(Some(&url))).await.unwrap();
    writer.ping().await.unwrap();
    writer.close().await;

    let reader = DbHandle::connect(&resolve(Some(&format!("{url}?mode=ro&cache=shared"))))
        .await
        .unwrap();
    assert_eq!(reader.ping().await.unwrap(), 1);
    let write = sea_orm::ConnectionTrait::execute_unprepared(
        reader.seaorm(),
        "CREATE TABLE t (id INTEGER)",
    )
    .await;
    assert!(write.is_err(), "write on a read-only store must fail");
}

#[tokio::test]
async fn read_only_missing_file_is_not_created() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("absent.db");
    let url = format!("sqlite:///{}?mode=ro", db_path.display());

    assert!(DbHandle::connect(&resolve(Some(&url))).await.is_err());
    assert!(!db_path.exists());
}

#[tokio::test]
async fn lazy_handle_is_built_once_under_contention() {
    let db = Arc::new(LazyDb::new(resolve(Some("sqlite::memory:"))));
    assert!(!db.is_initialized());

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let db = db.clone();
            tokio::spawn(async move { db.get().await.unwrap() })
        })
        .collect();

    let mut handles = Vec::new();
    for task in tasks {
        handles.push(task.await.unwrap());
    }
    let first = &handles[0];
    assert!(handles.iter().all(|h| Arc::ptr_eq(h, first)));
    assert!(db.is_initialized());
    assert!(db.get_if_ready().is_some());
}

#[tokio::test]
async fn failed_connect_reports_unavailable_and_retries() {
    let db = LazyDb::new(resolve(Some("mysql://nowhere/db")));

    for _ in 0..2 {
        let err = db.get().await.unwrap_err();
        assert!(matches!(err, DbError::Unavailable(_)), "got {err:?}");
        assert!(!db.is_initialized());
    }
}

#[tokio::test]
async fn unsupported_backend_is_rejected_directly() {
    let err = DbHandle::connect(&resolve(Some("oracle://h/db")))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::UnsupportedBackend(ref s) if s == "oracle"));
}
