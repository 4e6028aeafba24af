//! Normalization rules for connection strings.

use catalog_db::{resolve, Backend, PoolPolicy, DEFAULT_DATABASE_URL};

#[test]
fn absent_or_blank_falls_back_to_local_file() {
    for raw in [None, Some(""), Some("   "), Some("''"), Some(" '  ' ")] {
        let resolved = resolve(raw);
        assert_eq!(resolved.connection_string(), DEFAULT_DATABASE_URL, "input {raw:?}");
        assert!(resolved.descriptor.is_local_file_store());
        assert!(resolved.engine.allow_cross_thread());
        assert_eq!(resolved.engine.pool_size(), None);
        assert_eq!(resolved.engine.max_overflow(), None);
    }
}

#[test]
fn sqlite_url_passes_through_unchanged() {
    let resolved = resolve(Some("sqlite:///./data.db"));
    assert_eq!(resolved.connection_string(), "sqlite:///./data.db");
    assert_eq!(resolved.descriptor.backend(), Backend::Sqlite);
    assert!(resolved.engine.pool_pre_ping);
    assert_eq!(
        resolved.engine.pool,
        PoolPolicy::LocalFile {
            allow_cross_thread: true
        }
    );
}

#[test]
fn surrounding_quotes_and_whitespace_are_stripped() {
    let resolved = resolve(Some("  'sqlite:///./data.db'\n"));
    assert_eq!(resolved.connection_string(), "sqlite:///./data.db");
}

#[test]
fn postgres_gets_canonical_scheme_and_ssl() {
    let resolved = resolve(Some("postgres://u:p@host:5432/db?channel_binding=prefer"));
    assert_eq!(
        resolved.connection_string(),
        "postgresql://u:p@host:5432/db?sslmode=require"
    );
    assert_eq!(resolved.descriptor.backend(), Backend::Postgres);
    assert_eq!(resolved.engine.pool_size(), Some(5));
    assert_eq!(resolved.engine.max_overflow(), Some(0));
    assert!(!resolved.engine.allow_cross_thread());
}

#[test]
fn driver_suffix_is_dropped() {
    let resolved = resolve(Some("postgresql+psycopg2://u@host/db"));
    assert_eq!(
        resolved.connection_string(),
        "postgresql://u@host/db?sslmode=require"
    );
}

#[test]
fn scheme_matching_ignores_case() {
    assert_eq!(
        resolve(Some("POSTGRES://h/db")).connection_string(),
        "postgresql://h/db?sslmode=require"
    );
    assert!(resolve(Some("SQLite:///x.db")).descriptor.is_local_file_store());
}

#[test]
fn explicit_sslmode_is_kept() {
    let resolved = resolve(Some("postgres://h/db?sslmode=disable&application_name=catalog"));
    assert_eq!(
        resolved.connection_string(),
        "postgresql://h/db?sslmode=disable&application_name=catalog"
    );
}

#[test]
fn other_params_keep_their_order() {
    let resolved = resolve(Some(
        "postgres://h/db?connect_timeout=10&channel_binding=require&options=-c%20x",
    ));
    assert_eq!(
        resolved.connection_string(),
        "postgresql://h/db?connect_timeout=10&options=-c%20x&sslmode=require"
    );
}

#[test]
fn unknown_scheme_passes_through_with_network_pool() {
    let resolved = resolve(Some("mysql://u:p@h/db?charset=utf8"));
    assert_eq!(resolved.connection_string(), "mysql://u:p@h/db?charset=utf8");
    assert_eq!(
        resolved.descriptor.backend(),
        Backend::Other("mysql".to_string())
    );
    assert_eq!(resolved.engine.pool_size(), Some(5));
}

#[test]
fn input_without_scheme_is_not_mangled() {
    let resolved = resolve(Some("./data.db"));
    assert_eq!(resolved.connection_string(), "./data.db");
    assert_eq!(resolved.descriptor.scheme(), "");
}

#[test]
fn resolution_is_idempotent() {
    let inputs = [
        None,
        Some("sqlite:///./data.db"),
        Some("sqlite::memory:"),
        Some("'postgres://u:p@h:5432/db?channel_binding=x&a=1&a=2'"),
        Some("postgresql://h/db?sslmode=verify-full"),
        Some("mysql://h/db"),
        Some("plain-value"),
        Some("''postgres://h/db''"),
        Some("postgres://h/db#replica"),
    ];
    for raw in inputs {
        let once = resolve(raw);
        let twice = resolve(Some(&once.connection_string()));
        assert_eq!(once, twice, "input {raw:?}");
    }
}

#[test]
fn quoted_and_unquoted_postgres_resolve_alike() {
    assert_eq!(
        resolve(Some("'postgres://u:p@h/db'")),
        resolve(Some("postgres://u:p@h/db"))
    );
}

#[test]
fn nested_quotes_are_all_stripped() {
    let nested = resolve(Some("''postgres://h/db''"));
    assert_eq!(nested, resolve(Some("postgres://h/db")));
    assert_eq!(
        nested.connection_string(),
        "postgresql://h/db?sslmode=require"
    );
}

#[test]
fn missing_and_empty_input_resolve_alike() {
    assert_eq!(resolve(None), resolve(Some("")));
}

#[test]
fn fragment_stays_after_the_query() {
    let resolved = resolve(Some("postgres://u:p@h:5432/db#primary"));
    assert_eq!(resolved.descriptor.fragment(), Some("primary"));
    assert_eq!(resolved.descriptor.path_or_host_spec(), "//u:p@h:5432/db");
    assert_eq!(
        resolved.connection_string(),
        "postgresql://u:p@h:5432/db?sslmode=require#primary"
    );
}

#[test]
fn fragment_does_not_hide_query_params() {
    let resolved = resolve(Some("postgres://h/db?channel_binding=x&a=1#tag"));
    assert_eq!(
        resolved.connection_string(),
        "postgresql://h/db?a=1&sslmode=require#tag"
    );
}

#[test]
fn network_and_local_settings_are_exclusive() {
    for raw in ["sqlite:///a.db", "postgres://h/db", "mysql://h/db"] {
        let engine = resolve(Some(raw)).engine;
        let has_pool = engine.pool_size().is_some() && engine.max_overflow().is_some();
        assert_ne!(engine.allow_cross_thread(), has_pool, "input {raw}");
    }
}

#[test]
fn redacted_form_hides_password() {
    let resolved = resolve(Some("postgres://admin:hunter2@db:5432/catalog"));
    let shown = resolved.descriptor.redacted();
    assert!(!shown.contains("hunter2"));
    assert!(shown.contains("admin:***@db:5432"));
}
