//! Errores de persistencia.
//! Mapea errores de Diesel / pool / migraciones a variantes semánticas y las
//! traduce a `DomainError::StorageFailure` en la frontera del repositorio.

use chem_domain::DomainError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
  #[error("configuration error: {0}")]
  Config(String),
  #[error("unique violation: {0}")]
  UniqueViolation(String),
  #[error("check violation: {0}")]
  CheckViolation(String),
  #[error("not found")]
  NotFound,
  #[error("transient IO / connection pool error: {0}")]
  TransientIo(String),
  #[error("migration error: {0}")]
  Migration(String),
  #[error("corrupt row: {0}")]
  CorruptRow(String),
  #[error("unknown database error: {0}")]
  Unknown(String),
}

impl From<DieselError> for PersistenceError {
  fn from(err: DieselError) -> Self {
    match err {
      DieselError::NotFound => Self::NotFound,
      DieselError::DatabaseError(kind, info) => match kind {
        DatabaseErrorKind::UniqueViolation => Self::UniqueViolation(info.message().to_string()),
        DatabaseErrorKind::CheckViolation => Self::CheckViolation(info.message().to_string()),
        DatabaseErrorKind::ClosedConnection => Self::TransientIo(info.message().to_string()),
        other => Self::Unknown(format!("db error kind {:?}: {}", other, info.message())),
      },
      DieselError::DeserializationError(e) => Self::CorruptRow(format!("deser: {e}")),
      DieselError::SerializationError(e) => Self::Unknown(format!("ser: {e}")),
      other => Self::Unknown(format!("unhandled diesel error: {other:?}")),
    }
  }
}

impl From<diesel::r2d2::PoolError> for PersistenceError {
  fn from(err: diesel::r2d2::PoolError) -> Self {
    Self::TransientIo(format!("pool error: {err}"))
  }
}

impl From<PersistenceError> for DomainError {
  fn from(err: PersistenceError) -> Self {
    DomainError::StorageFailure(err.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn diesel_not_found_maps_to_not_found() {
    assert!(matches!(PersistenceError::from(DieselError::NotFound), PersistenceError::NotFound));
  }

  #[test]
  fn persistence_errors_become_storage_failures() {
    let err: DomainError = PersistenceError::TransientIo("pool error: timed out".into()).into();
    assert_eq!(err, DomainError::StorageFailure("transient IO / connection pool error: pool error: timed out".into()));
  }
}
