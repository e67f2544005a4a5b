//! Persistencia Diesel del servicio de molaridad.
//!
//! Expone el repositorio que implementa `ChemicalRepository` y
//! `CalculationRepository` del dominio sobre un pool r2d2. El backend por
//! defecto es SQLite; con el feature `pg` se compila contra Postgres.
//!
//! Módulos:
//! - `config`: carga de configuración desde .env / entorno.
//! - `error`: mapeo de errores Diesel a `PersistenceError`.
//! - `migrations`: runner embebido de migraciones Diesel.
//! - `schema`: tablas Diesel declaradas para compilar queries.

pub mod config;
mod domain_persistence;
pub mod error;
pub mod migrations;
pub mod schema;

pub use config::{init_dotenv, DbConfig};
pub use domain_persistence::{new_from_env, DieselDomainRepository};
pub use error::PersistenceError;
