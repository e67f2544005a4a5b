// history.rs
use crate::{CalculationRepository, CalculationResult, DomainError};
use log::debug;
use std::sync::Arc;

/// Límite por defecto de `list` cuando el cliente no indica uno.
pub const HISTORY_DEFAULT_LIMIT: i64 = 50;
/// Máximo de resultados que `list` devuelve, pida lo que pida el cliente.
pub const HISTORY_MAX_LIMIT: i64 = 100;

/// Ajusta el límite pedido al rango `1..=HISTORY_MAX_LIMIT`.
pub fn clamp_limit(requested: i64) -> usize {
  requested.clamp(1, HISTORY_MAX_LIMIT) as usize
}

/// Historial de cálculos: solo se anexa, se lista y se vacía completo.
#[derive(Clone)]
pub struct CalculationHistory {
  repo: Arc<dyn CalculationRepository>,
}

impl CalculationHistory {
  pub fn new(repo: Arc<dyn CalculationRepository>) -> Self {
    Self { repo }
  }

  pub fn save(&self, result: &CalculationResult) -> Result<String, DomainError> {
    let id = self.repo.save_calculation(result)?;
    debug!("save: calculation {} stored (molarity={})", id, result.molarity);
    Ok(id)
  }

  pub fn list(&self, limit: i64) -> Result<Vec<CalculationResult>, DomainError> {
    self.repo.list_calculations(clamp_limit(limit))
  }

  pub fn clear_all(&self) -> Result<u64, DomainError> {
    let deleted = self.repo.delete_all_calculations()?;
    debug!("clear_all: {} calculations deleted", deleted);
    Ok(deleted)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{CalculationRequest, ChemicalCatalog, InMemoryDomainRepository, MolarityCalculator};

  fn fixture() -> (CalculationHistory, MolarityCalculator) {
    let repo = Arc::new(InMemoryDomainRepository::new());
    let catalog = ChemicalCatalog::new(repo.clone());
    catalog.seed_if_empty();
    (CalculationHistory::new(repo), MolarityCalculator::new(catalog))
  }

  fn custom(mass: f64) -> CalculationRequest {
    CalculationRequest { chemical_id: None,
                         custom_molar_mass: Some(10.0),
                         mass,
                         volume: 1.0,
                         volume_unit: "L".into() }
  }

  #[test]
  fn limit_is_clamped() {
    assert_eq!(clamp_limit(1000), 100);
    assert_eq!(clamp_limit(100), 100);
    assert_eq!(clamp_limit(50), 50);
    assert_eq!(clamp_limit(0), 1);
    assert_eq!(clamp_limit(-7), 1);
  }

  #[test]
  fn list_never_exceeds_one_hundred() -> Result<(), DomainError> {
    let (history, calc) = fixture();
    for i in 1..=120 {
      history.save(&calc.calculate(&custom(i as f64))?)?;
    }
    assert_eq!(history.list(1000)?.len(), 100);
    assert_eq!(history.list(HISTORY_DEFAULT_LIMIT)?.len(), 50);
    Ok(())
  }

  #[test]
  fn clear_all_then_list_is_empty() -> Result<(), DomainError> {
    let (history, calc) = fixture();
    for i in 1..=4 {
      history.save(&calc.calculate(&custom(i as f64))?)?;
    }
    assert_eq!(history.clear_all()?, 4);
    assert!(history.list(50)?.is_empty());
    Ok(())
  }

  #[test]
  fn save_returns_result_id() -> Result<(), DomainError> {
    let (history, calc) = fixture();
    let result = calc.calculate(&custom(3.0))?;
    assert_eq!(history.save(&result)?, result.id);
    Ok(())
  }
}
