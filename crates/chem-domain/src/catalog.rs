// catalog.rs
//! Catálogo de referencia de especies químicas.
//!
//! El catálogo se puebla una única vez al arrancar (`seed_if_empty`) y luego
//! solo se consulta. Nunca se modifican ni eliminan especies desde la API.
use crate::{Chemical, ChemicalRepository, DomainError};
use log::{debug, error, info};
use std::sync::Arc;

/// Tope de registros devueltos por `list_all`.
pub const CATALOG_LIST_CAP: usize = 1000;

/// (id, nombre, fórmula, masa molar g/mol, categoría)
const SEED_DATA: [(&str, &str, &str, f64, &str); 20] = [
  ("nacl", "Sodium Chloride (NaCl)", "NaCl", 58.44, "Salt"),
  ("h2so4", "Sulfuric Acid (H₂SO₄)", "H₂SO₄", 98.08, "Acid"),
  ("naoh", "Sodium Hydroxide (NaOH)", "NaOH", 40.00, "Base"),
  ("hcl", "Hydrochloric Acid (HCl)", "HCl", 36.46, "Acid"),
  ("caco3", "Calcium Carbonate (CaCO₃)", "CaCO₃", 100.09, "Salt"),
  ("koh", "Potassium Hydroxide (KOH)", "KOH", 56.11, "Base"),
  ("h3po4", "Phosphoric Acid (H₃PO₄)", "H₃PO₄", 97.99, "Acid"),
  ("na2co3", "Sodium Carbonate (Na₂CO₃)", "Na₂CO₃", 105.99, "Salt"),
  ("mgso4", "Magnesium Sulfate (MgSO₄)", "MgSO₄", 120.37, "Salt"),
  ("glucose", "Glucose (C₆H₁₂O₆)", "C₆H₁₂O₆", 180.16, "Organic compound"),
  ("sucrose", "Sucrose (C₁₂H₂₂O₁₁)", "C₁₂H₂₂O₁₁", 342.30, "Organic compound"),
  ("kcl", "Potassium Chloride (KCl)", "KCl", 74.55, "Salt"),
  ("nh4cl", "Ammonium Chloride (NH₄Cl)", "NH₄Cl", 53.49, "Salt"),
  ("caso4", "Calcium Sulfate (CaSO₄)", "CaSO₄", 136.14, "Salt"),
  ("fe2o3", "Iron(III) Oxide (Fe₂O₃)", "Fe₂O₃", 159.69, "Oxide"),
  ("al2o3", "Aluminium Oxide (Al₂O₃)", "Al₂O₃", 101.96, "Oxide"),
  ("h2o2", "Hydrogen Peroxide (H₂O₂)", "H₂O₂", 34.01, "Peroxide"),
  ("ch3cooh", "Acetic Acid (CH₃COOH)", "CH₃COOH", 60.05, "Organic acid"),
  ("bacl2", "Barium Chloride (BaCl₂)", "BaCl₂", 208.23, "Salt"),
  ("agno3", "Silver Nitrate (AgNO₃)", "AgNO₃", 169.87, "Salt"),
];

/// Construye la lista fija de especies con la que se siembra el catálogo.
pub fn seed_chemicals() -> Result<Vec<Chemical>, DomainError> {
  SEED_DATA.iter()
           .map(|(id, name, formula, molar_mass, category)| Chemical::new(id, name, formula, *molar_mass, category))
           .collect()
}

/// Acceso de solo lectura al catálogo sobre un `ChemicalRepository`.
#[derive(Clone)]
pub struct ChemicalCatalog {
  repo: Arc<dyn ChemicalRepository>,
}

impl ChemicalCatalog {
  pub fn new(repo: Arc<dyn ChemicalRepository>) -> Self {
    Self { repo }
  }

  /// Siembra el catálogo si está vacío. Devuelve cuántas especies se
  /// insertaron; los errores se registran y no se propagan.
  pub fn seed_if_empty(&self) -> usize {
    match self.try_seed() {
      Ok(0) => 0,
      Ok(n) => {
        info!("Seeded {} chemicals to database", n);
        n
      }
      Err(e) => {
        error!("Error seeding chemicals: {}", e);
        0
      }
    }
  }

  fn try_seed(&self) -> Result<usize, DomainError> {
    let existing = self.repo.count_chemicals()?;
    if existing > 0 {
      info!("Chemical database already has {} records", existing);
      return Ok(0);
    }
    let seed = seed_chemicals()?;
    self.repo.insert_chemicals(&seed)
  }

  pub fn list_all(&self) -> Result<Vec<Chemical>, DomainError> {
    let chemicals = self.repo.list_chemicals(CATALOG_LIST_CAP)?;
    debug!("list_all: {} chemicals", chemicals.len());
    Ok(chemicals)
  }

  pub fn get_by_id(&self, id: &str) -> Result<Chemical, DomainError> {
    self.repo
        .get_chemical(id)?
        .ok_or_else(|| DomainError::NotFound("Chemical not found".to_string()))
  }
}
