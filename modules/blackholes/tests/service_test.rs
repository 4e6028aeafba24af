//! Domain service and seeding against a real in-memory SQLite store.

mod common;

use anyhow::Result;
use blackholes::domain::repo::BlackHolesRepository;
use blackholes::domain::seed::{reference_catalog, seed_catalog};
use blackholes::infra::storage::SeaOrmBlackHolesRepository;
use blackholes::{DomainError, NewBlackHole, SeedOutcome};
use sea_orm::ConnectionTrait;

fn entry(name: &str) -> NewBlackHole {
    NewBlackHole {
        name: name.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_then_get_round_trip() -> Result<()> {
    let service = common::create_test_service().await;

    let created = service
        .create_black_hole(NewBlackHole {
            name: "Cygnus X-1".into(),
            distance_ly: Some(7_200.0),
            mass_solar: Some(21.2),
            description: None,
        })
        .await?;
    assert!(created.id > 0);

    let fetched = service.get_black_hole(created.id).await?;
    assert_eq!(fetched, created);
    assert_eq!(fetched.description, None);
    Ok(())
}

#[tokio::test]
async fn missing_id_is_not_found() {
    let service = common::create_test_service().await;
    let err = service.get_black_hole(4242).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { id: 4242 }));
}

#[tokio::test]
async fn list_is_ordered_and_paged() -> Result<()> {
    let service = common::create_test_service().await;
    for i in 0..5 {
        service.create_black_hole(entry(&format!("BH-{i}"))).await?;
    }

    let all = service.list_black_holes(None, None).await?;
    assert_eq!(all.len(), 5);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));

    let page = service.list_black_holes(Some(2), Some(3)).await?;
    let names: Vec<_> = page.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["BH-3", "BH-4"]);

    assert!(service.list_black_holes(Some(10), Some(50)).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn paging_bounds_are_enforced() {
    let service = common::create_test_service().await;
    for (limit, offset) in [(Some(0), None), (Some(101), None), (Some(-3), None), (None, Some(-1))] {
        let err = service.list_black_holes(limit, offset).await.unwrap_err();
        assert!(
            matches!(err, DomainError::Validation { .. }),
            "limit={limit:?} offset={offset:?} gave {err:?}"
        );
    }
    assert!(service.list_black_holes(Some(100), Some(0)).await.is_ok());
}

#[tokio::test]
async fn invalid_payload_is_not_stored() -> Result<()> {
    let repo = common::create_test_repo().await;
    let service = blackholes::domain::service::Service::new(repo.clone(), Default::default());

    let err = service.create_black_hole(entry("  ")).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "name"));
    assert_eq!(repo.count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn seed_fills_empty_catalog_once() -> Result<()> {
    let repo = common::create_test_repo().await;

    let first = seed_catalog(repo.as_ref()).await;
    assert_eq!(
        first,
        SeedOutcome::Seeded {
            inserted: reference_catalog().len()
        }
    );

    let second = seed_catalog(repo.as_ref()).await;
    assert_eq!(second, SeedOutcome::AlreadyPresent { existing: 2 });

    let rows = repo.list(10, 0).await?;
    assert_eq!(rows[0].name, "Sagittarius A*");
    assert_eq!(rows[0].mass_solar, Some(4.3e6));
    assert_eq!(rows[1].name, "M87*");
    assert_eq!(rows[1].distance_ly, Some(53_000_000.0));
    Ok(())
}

#[tokio::test]
async fn seed_leaves_existing_rows_alone() -> Result<()> {
    let repo = common::create_test_repo().await;
    repo.insert(entry("V404 Cygni")).await?;

    assert_eq!(
        seed_catalog(repo.as_ref()).await,
        SeedOutcome::AlreadyPresent { existing: 1 }
    );
    assert_eq!(repo.count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn failed_seed_leaves_catalog_empty_and_retry_succeeds() -> Result<()> {
    let db = common::create_test_db().await;
    let repo = SeaOrmBlackHolesRepository::new(db.clone());

    // Reject the second reference entry after the first one was written.
    db.execute_unprepared(
        "CREATE TRIGGER reject_m87 BEFORE INSERT ON blackholes \
         WHEN NEW.name = 'M87*' BEGIN SELECT RAISE(ABORT, 'rejected'); END",
    )
    .await?;

    assert!(matches!(
        seed_catalog(&repo).await,
        SeedOutcome::Skipped { .. }
    ));
    assert_eq!(repo.count().await?, 0);

    db.execute_unprepared("DROP TRIGGER reject_m87").await?;
    assert_eq!(
        seed_catalog(&repo).await,
        SeedOutcome::Seeded { inserted: 2 }
    );
    assert_eq!(repo.count().await?, 2);
    Ok(())
}

#[tokio::test]
async fn insert_many_is_all_or_nothing() -> Result<()> {
    let db = common::create_test_db().await;
    let repo = SeaOrmBlackHolesRepository::new(db.clone());
    db.execute_unprepared(
        "CREATE TRIGGER reject_bad BEFORE INSERT ON blackholes \
         WHEN NEW.name = 'bad' BEGIN SELECT RAISE(ABORT, 'rejected'); END",
    )
    .await?;

    let rows = vec![entry("Cygnus X-1"), entry("bad"), entry("GRS 1915+105")];
    assert!(repo.insert_many(rows).await.is_err());
    assert_eq!(repo.count().await?, 0);

    let saved = repo
        .insert_many(vec![entry("Cygnus X-1"), entry("GRS 1915+105")])
        .await?;
    assert_eq!(saved.len(), 2);
    assert!(saved[0].id < saved[1].id);
    Ok(())
}
