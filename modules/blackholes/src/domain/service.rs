use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::config::BlackholesConfig;
use crate::contract::{BlackHole, NewBlackHole};
use crate::domain::error::DomainError;
use crate::domain::repo::BlackHolesRepository;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Catalog rules on top of the repository port.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn BlackHolesRepository>,
    config: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl From<&BlackholesConfig> for ServiceConfig {
    fn from(cfg: &BlackholesConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn BlackHolesRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(name = "blackholes.service.list", skip(self))]
    pub async fn list_black_holes(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<BlackHole>, DomainError> {
        let limit = self.validate_limit(limit)?;
        let offset = match offset {
            None => 0,
            Some(o) if o >= 0 => o as u64,
            Some(_) => return Err(DomainError::validation("offset", "must be >= 0")),
        };

        let items = self
            .repo
            .list(limit, offset)
            .await
            .map_err(DomainError::from_repo)?;
        debug!(count = items.len(), "listed black holes");
        Ok(items)
    }

    #[instrument(name = "blackholes.service.get", skip(self), fields(id = %id))]
    pub async fn get_black_hole(&self, id: i32) -> Result<BlackHole, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(DomainError::from_repo)?
            .ok_or_else(|| DomainError::not_found(id))
    }

    #[instrument(name = "blackholes.service.create", skip(self, new), fields(name = %new.name))]
    pub async fn create_black_hole(&self, new: NewBlackHole) -> Result<BlackHole, DomainError> {
        validate_new(&new)?;

        let created = self
            .repo
            .insert(new)
            .await
            .map_err(DomainError::from_repo)?;
        info!(id = created.id, "created black hole");
        Ok(created)
    }

    fn validate_limit(&self, limit: Option<i64>) -> Result<u64, DomainError> {
        let max = self.config.max_page_size;
        match limit {
            None => Ok(self.config.default_page_size.min(max)),
            Some(l) if l >= 1 && (l as u64) <= max => Ok(l as u64),
            Some(_) => Err(DomainError::validation(
                "limit",
                format!("must be between 1 and {max}"),
            )),
        }
    }
}

pub(crate) fn validate_new(new: &NewBlackHole) -> Result<(), DomainError> {
    if new.name.trim().is_empty() {
        return Err(DomainError::validation("name", "must not be blank"));
    }
    let name_len = new.name.chars().count();
    if name_len > MAX_NAME_LEN {
        return Err(DomainError::validation(
            "name",
            format!("too long: {name_len} characters (max: {MAX_NAME_LEN})"),
        ));
    }
    if let Some(description) = &new.description {
        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(DomainError::validation(
                "description",
                format!("too long: {len} characters (max: {MAX_DESCRIPTION_LEN})"),
            ));
        }
    }
    for (field, value) in [("distance_ly", new.distance_ly), ("mass_solar", new.mass_solar)] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(DomainError::validation(
                    field,
                    "must be a finite, non-negative number",
                ));
            }
        }
    }
    Ok(())
}
