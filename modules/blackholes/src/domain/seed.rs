//! Reference entries inserted into an empty catalog.

use tracing::{info, warn};

use crate::contract::NewBlackHole;
use crate::domain::error::DomainError;
use crate::domain::repo::BlackHolesRepository;

/// What a seeding attempt did. Seeding never fails the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded { inserted: usize },
    AlreadyPresent { existing: u64 },
    Skipped { reason: String },
}

pub fn reference_catalog() -> Vec<NewBlackHole> {
    vec![
        NewBlackHole {
            name: "Sagittarius A*".to_string(),
            distance_ly: Some(26_000.0),
            mass_solar: Some(4.3e6),
            description: Some("Supermassive black hole at the center of the Milky Way.".to_string()),
        },
        NewBlackHole {
            name: "M87*".to_string(),
            distance_ly: Some(53_000_000.0),
            mass_solar: Some(6.5e9),
            description: Some("First black hole shadow imaged by the EHT (2019).".to_string()),
        },
    ]
}

/// Insert [`reference_catalog`] when the table is empty.
pub async fn seed_catalog(repo: &dyn BlackHolesRepository) -> SeedOutcome {
    let outcome = try_seed(repo).await.unwrap_or_else(|e| SeedOutcome::Skipped {
        reason: e.to_string(),
    });
    match &outcome {
        SeedOutcome::Seeded { inserted } => info!(inserted, "seeded black hole catalog"),
        SeedOutcome::AlreadyPresent { existing } => {
            info!(existing, "catalog already populated, seed not needed")
        }
        SeedOutcome::Skipped { reason } => warn!(%reason, "catalog seed skipped"),
    }
    outcome
}

async fn try_seed(repo: &dyn BlackHolesRepository) -> Result<SeedOutcome, DomainError> {
    let existing = repo.count().await.map_err(DomainError::from_repo)?;
    if existing > 0 {
        return Ok(SeedOutcome::AlreadyPresent { existing });
    }

    let inserted = repo
        .insert_many(reference_catalog())
        .await
        .map_err(DomainError::from_repo)?;
    Ok(SeedOutcome::Seeded {
        inserted: inserted.len(),
    })
}
