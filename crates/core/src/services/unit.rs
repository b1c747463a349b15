//! Unit directory service.

use unitvisit_common::AppResult;
use unitvisit_db::{entities::unit, repositories::UnitRepository};

/// Resolves unit codes to unit records and their main (top-level) units.
#[derive(Clone)]
pub struct UnitService {
    unit_repo: UnitRepository,
}

impl UnitService {
    /// Create a new unit service.
    #[must_use]
    pub const fn new(unit_repo: UnitRepository) -> Self {
        Self { unit_repo }
    }

    /// Resolve a unit code to its record.
    pub async fn resolve(&self, code: &str) -> AppResult<unit::Model> {
        self.unit_repo.get_by_code(code).await
    }

    /// Resolve the main unit for a unit.
    ///
    /// A sub-unit resolves to its parent; a main unit resolves to itself.
    /// Fixed point after one hop: the parent chain has depth at most 1.
    pub async fn resolve_main(&self, unit: &unit::Model) -> AppResult<unit::Model> {
        match unit.parent_code.as_deref() {
            Some(parent_code) => self.unit_repo.get_by_code(parent_code).await,
            None => Ok(unit.clone()),
        }
    }

    /// List all units.
    pub async fn list(&self) -> AppResult<Vec<unit::Model>> {
        self.unit_repo.find_all().await
    }

    /// List main units only.
    pub async fn list_main(&self) -> AppResult<Vec<unit::Model>> {
        self.unit_repo.find_main_units().await
    }
}
