//! Wrapper para correr migraciones embebidas.
//!
//! Las migraciones viven en `migrations/` de este crate y usan SQL válido para
//! SQLite y Postgres. Se ejecutan una vez al construir el pool.

use crate::error::PersistenceError;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub(crate) fn run_pending_migrations(conn: &mut crate::domain_persistence::DbConn) -> Result<(), PersistenceError> {
  conn.run_pending_migrations(MIGRATIONS)
      .map(|applied| log::debug!("migrations applied: {}", applied.len()))
      .map_err(|e| PersistenceError::Migration(e.to_string()))
}
