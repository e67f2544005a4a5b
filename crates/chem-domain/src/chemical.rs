// chemical.rs
use crate::DomainError;
use serde::Serialize;
use std::fmt;

/// Especie química del catálogo de referencia. Inmutable una vez creada.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chemical {
  id: String,
  name: String,
  formula: String,
  molar_mass: f64,
  category: String,
}

impl Chemical {
  pub fn new(id: &str, name: &str, formula: &str, molar_mass: f64, category: &str) -> Result<Self, DomainError> {
    if id.trim().is_empty() {
      return Err(DomainError::invalid("Chemical id must not be empty"));
    }
    if name.trim().is_empty() {
      return Err(DomainError::invalid("Chemical name must not be empty"));
    }
    if !(molar_mass.is_finite() && molar_mass > 0.0) {
      return Err(DomainError::invalid(format!("Molar mass of '{}' must be greater than 0", id)));
    }
    Ok(Self { id: id.to_string(),
              name: name.to_string(),
              formula: formula.to_string(),
              molar_mass,
              category: category.to_string() })
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn formula(&self) -> &str {
    &self.formula
  }

  pub fn molar_mass(&self) -> f64 {
    self.molar_mass
  }

  pub fn category(&self) -> &str {
    &self.category
  }
}

impl fmt::Display for Chemical {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({}, {} g/mol)", self.name, self.formula, self.molar_mass)
  }
}
