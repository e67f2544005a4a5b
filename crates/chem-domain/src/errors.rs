// errors.rs
use thiserror::Error;

/// Errores del dominio de cálculo de molaridad.
///
/// El mensaje de cada variante es el texto legible que la capa HTTP devuelve
/// al cliente, por eso el `Display` no agrega prefijos.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
  /// Entrada corregible por el cliente (400).
  #[error("{0}")]
  InvalidInput(String),
  /// Entidad inexistente (404).
  #[error("{0}")]
  NotFound(String),
  /// Falla de infraestructura de almacenamiento (500).
  #[error("{0}")]
  StorageFailure(String),
}

impl DomainError {
  pub fn invalid(msg: impl Into<String>) -> Self {
    Self::InvalidInput(msg.into())
  }

  pub fn storage(msg: impl Into<String>) -> Self {
    Self::StorageFailure(msg.into())
  }
}
