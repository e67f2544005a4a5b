//! Carga de configuración de conexión desde variables de entorno.
//! `DATABASE_URL` y `DB_NAME` son obligatorias; los tamaños del pool no.

use crate::error::PersistenceError;
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
  let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
  /// Servidor Postgres (feature `pg`) o directorio del archivo SQLite.
  pub url: String,
  /// Nombre de la base (Postgres) o del archivo SQLite sin extensión.
  pub db_name: String,
  pub min_connections: u32,
  pub max_connections: u32,
}

impl DbConfig {
  pub fn from_env() -> Result<Self, PersistenceError> {
    // asegura que .env se haya cargado
    Lazy::force(&DOTENV_LOADED);
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Igual que `from_env` pero con una fuente de variables inyectable.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, PersistenceError>
    where F: Fn(&str) -> Option<String>
  {
    let required = |key: &str| {
      lookup(key).filter(|v| !v.trim().is_empty())
                 .ok_or_else(|| PersistenceError::Config(format!("{key} no definido")))
    };
    let url = required("DATABASE_URL")?;
    let db_name = required("DB_NAME")?;
    let min_connections = lookup("DATABASE_MIN_CONNECTIONS").and_then(|v| v.parse().ok()).unwrap_or(1);
    let max_connections = lookup("DATABASE_MAX_CONNECTIONS").and_then(|v| v.parse().ok()).unwrap_or(8);
    Ok(Self { url, db_name, min_connections, max_connections })
  }

  /// URL final de conexión: `<servidor>/<db_name>` conservando la query.
  #[cfg(feature = "pg")]
  pub fn connection_url(&self) -> String {
    let (base, query) = match self.url.split_once('?') {
      Some((b, q)) => (b, format!("?{q}")),
      None => (self.url.as_str(), String::new()),
    };
    format!("{}/{}{}", base.trim_end_matches('/'), self.db_name, query)
  }

  /// Ruta final del archivo: `<directorio>/<db_name>.db`.
  #[cfg(not(feature = "pg"))]
  pub fn connection_url(&self) -> String {
    std::path::Path::new(&self.url).join(format!("{}.db", self.db_name)).to_string_lossy().into_owned()
  }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
  Lazy::force(&DOTENV_LOADED);
}
