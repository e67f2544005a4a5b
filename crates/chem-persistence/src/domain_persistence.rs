use crate::config::DbConfig;
use crate::error::PersistenceError;
use crate::migrations::run_pending_migrations;
use crate::schema;
use crate::schema::calculations::dsl as calc_dsl;
use crate::schema::chemicals::dsl as chem_dsl;
use chem_domain::{CalculationRepository, CalculationResult, Chemical, ChemicalRepository, DomainError, VolumeUnit};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use log::{debug, info};
use std::sync::Arc;

#[cfg(feature = "pg")]
pub(crate) type DbConn = PgConnection;
#[cfg(not(feature = "pg"))]
pub(crate) type DbConn = SqliteConnection;
type DbPool = Pool<ConnectionManager<DbConn>>;

/// Pragmas aplicados a cada conexión SQLite que entrega el pool.
#[cfg(not(feature = "pg"))]
#[derive(Debug)]
struct SqlitePragmas;

#[cfg(not(feature = "pg"))]
impl diesel::r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    use diesel::connection::SimpleConnection;
    conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;")
        .map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Repo Diesel que implementa `ChemicalRepository` y `CalculationRepository`.
///
/// Es el único cliente de persistencia del proceso: se construye una vez al
/// arrancar y se comparte (vía `Arc`) entre todos los handlers.
#[derive(Clone)]
pub struct DieselDomainRepository {
  pool: Arc<DbPool>,
}

impl DieselDomainRepository {
  /// Construye el pool y aplica las migraciones pendientes.
  pub fn new(database_url: &str, min_size: u32, max_size: u32) -> Result<Self, PersistenceError> {
    let max_size = max_size.max(1);
    let min_size = min_size.max(1).min(max_size);
    let manager = ConnectionManager::<DbConn>::new(database_url);
    let builder = Pool::builder().min_idle(Some(min_size)).max_size(max_size);
    #[cfg(not(feature = "pg"))]
    let builder = builder.connection_customizer(Box::new(SqlitePragmas));
    let pool = builder.build(manager)
                      .map_err(|e| PersistenceError::TransientIo(format!("pool build: {e}")))?;
    {
      let mut conn = pool.get()?;
      run_pending_migrations(&mut conn)?;
    }
    info!("persistence pool ready (min={}, max={})", min_size, max_size);
    Ok(Self { pool: Arc::new(pool) })
  }

  pub fn connect(cfg: &DbConfig) -> Result<Self, PersistenceError> {
    Self::new(&cfg.connection_url(), cfg.min_connections, cfg.max_connections)
  }

  fn conn(&self) -> Result<PooledConnection<ConnectionManager<DbConn>>, DomainError> {
    self.pool.get().map_err(|e| PersistenceError::from(e).into())
  }
}

// Diesel row structs for the molarity tables
#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = schema::chemicals)]
struct ChemicalRow {
  pub id: String,
  pub name: String,
  pub formula: String,
  pub molar_mass: f64,
  pub category: String,
}

impl From<&Chemical> for ChemicalRow {
  fn from(c: &Chemical) -> Self {
    Self { id: c.id().to_string(),
           name: c.name().to_string(),
           formula: c.formula().to_string(),
           molar_mass: c.molar_mass(),
           category: c.category().to_string() }
  }
}

impl ChemicalRow {
  fn into_domain(self) -> Result<Chemical, PersistenceError> {
    Chemical::new(&self.id, &self.name, &self.formula, self.molar_mass, &self.category)
      .map_err(|e| PersistenceError::CorruptRow(format!("chemical {}: {}", self.id, e)))
  }
}

#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = schema::calculations)]
struct CalculationRow {
  pub id: String,
  pub chemical_id: Option<String>,
  pub chemical_name: String,
  pub custom_molar_mass: Option<f64>,
  pub mass: f64,
  pub volume: f64,
  pub volume_unit: String,
  pub volume_in_liters: f64,
  pub molar_mass: f64,
  pub moles: f64,
  pub molarity: f64,
  pub created_at_ts: i64,
}

impl From<&CalculationResult> for CalculationRow {
  fn from(r: &CalculationResult) -> Self {
    Self { id: r.id.clone(),
           chemical_id: r.chemical_id.clone(),
           chemical_name: r.chemical_name.clone(),
           custom_molar_mass: r.custom_molar_mass,
           mass: r.mass,
           volume: r.volume,
           volume_unit: r.volume_unit.as_str().to_string(),
           volume_in_liters: r.volume_in_liters,
           molar_mass: r.molar_mass,
           moles: r.moles,
           molarity: r.molarity,
           created_at_ts: r.created_at.timestamp_micros() }
  }
}

impl CalculationRow {
  fn into_domain(self) -> Result<CalculationResult, PersistenceError> {
    let volume_unit = VolumeUnit::parse(&self.volume_unit)
      .map_err(|_| PersistenceError::CorruptRow(format!("calculation {}: volume_unit '{}'", self.id, self.volume_unit)))?;
    let created_at = DateTime::<Utc>::from_timestamp_micros(self.created_at_ts)
      .ok_or_else(|| PersistenceError::CorruptRow(format!("calculation {}: created_at_ts out of range", self.id)))?;
    Ok(CalculationResult { id: self.id,
                           chemical_id: self.chemical_id,
                           chemical_name: self.chemical_name,
                           custom_molar_mass: self.custom_molar_mass,
                           mass: self.mass,
                           volume: self.volume,
                           volume_unit,
                           volume_in_liters: self.volume_in_liters,
                           molar_mass: self.molar_mass,
                           moles: self.moles,
                           molarity: self.molarity,
                           created_at })
  }
}

fn map_db_err<T>(res: std::result::Result<T, diesel::result::Error>) -> Result<T, DomainError> {
  res.map_err(|e| PersistenceError::from(e).into())
}

impl ChemicalRepository for DieselDomainRepository {
  fn count_chemicals(&self) -> Result<u64, DomainError> {
    let mut conn = self.conn()?;
    let n: i64 = map_db_err(chem_dsl::chemicals.count().get_result(&mut conn))?;
    Ok(n as u64)
  }

  fn insert_chemicals(&self, batch: &[Chemical]) -> Result<usize, DomainError> {
    let mut conn = self.conn()?;
    let rows: Vec<ChemicalRow> = batch.iter().map(ChemicalRow::from).collect();
    // all-or-nothing: a duplicate id rolls the whole batch back
    let inserted = map_db_err(conn.transaction(|tx| {
                                    let mut n = 0;
                                    for row in &rows {
                                      n += diesel::insert_into(chem_dsl::chemicals).values(row).execute(tx)?;
                                    }
                                    Ok::<usize, diesel::result::Error>(n)
                                  }))?;
    debug!("insert_chemicals: {} rows", inserted);
    Ok(inserted)
  }

  fn list_chemicals(&self, limit: usize) -> Result<Vec<Chemical>, DomainError> {
    let mut conn = self.conn()?;
    let rows = map_db_err(chem_dsl::chemicals.limit(limit as i64).load::<ChemicalRow>(&mut conn))?;
    rows.into_iter().map(|r| r.into_domain().map_err(DomainError::from)).collect()
  }

  fn get_chemical(&self, id: &str) -> Result<Option<Chemical>, DomainError> {
    let mut conn = self.conn()?;
    let opt = map_db_err(chem_dsl::chemicals.filter(chem_dsl::id.eq(id))
                                            .first::<ChemicalRow>(&mut conn)
                                            .optional())?;
    match opt {
      Some(r) => Ok(Some(r.into_domain()?)),
      None => Ok(None),
    }
  }
}

impl CalculationRepository for DieselDomainRepository {
  fn save_calculation(&self, result: &CalculationResult) -> Result<String, DomainError> {
    let mut conn = self.conn()?;
    let row = CalculationRow::from(result);
    map_db_err(diesel::insert_into(calc_dsl::calculations).values(&row).execute(&mut conn))?;
    Ok(row.id)
  }

  fn list_calculations(&self, limit: usize) -> Result<Vec<CalculationResult>, DomainError> {
    let mut conn = self.conn()?;
    let rows = map_db_err(calc_dsl::calculations.order((calc_dsl::created_at_ts.desc(), calc_dsl::id.desc()))
                                                .limit(limit as i64)
                                                .load::<CalculationRow>(&mut conn))?;
    rows.into_iter().map(|r| r.into_domain().map_err(DomainError::from)).collect()
  }

  fn delete_all_calculations(&self) -> Result<u64, DomainError> {
    let mut conn = self.conn()?;
    let deleted = map_db_err(diesel::delete(calc_dsl::calculations).execute(&mut conn))?;
    Ok(deleted as u64)
  }
}

/// Crear repo desde las variables de entorno (`DATABASE_URL`, `DB_NAME`).
pub fn new_from_env() -> Result<DieselDomainRepository, PersistenceError> {
  let cfg = DbConfig::from_env()?;
  DieselDomainRepository::connect(&cfg)
}
