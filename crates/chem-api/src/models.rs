//! Proyecciones de respuesta de la API.

use chem_domain::{CalculationResult, Chemical, VolumeUnit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalResponse {
    pub id: String,
    pub name: String,
    pub formula: String,
    pub molar_mass: f64,
    pub category: String,
}

impl From<&Chemical> for ChemicalResponse {
    fn from(c: &Chemical) -> Self {
        Self { id: c.id().to_string(),
               name: c.name().to_string(),
               formula: c.formula().to_string(),
               molar_mass: c.molar_mass(),
               category: c.category().to_string() }
    }
}

/// Vista pública de un cálculo; omite la referencia al catálogo y la masa
/// molar personalizada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub id: String,
    pub chemical_name: String,
    pub mass: f64,
    pub volume: f64,
    pub volume_unit: VolumeUnit,
    pub volume_in_liters: f64,
    pub molar_mass: f64,
    pub moles: f64,
    pub molarity: f64,
    pub created_at: DateTime<Utc>,
}

impl From<CalculationResult> for CalculationResponse {
    fn from(r: CalculationResult) -> Self {
        Self { id: r.id,
               chemical_name: r.chemical_name,
               mass: r.mass,
               volume: r.volume,
               volume_unit: r.volume_unit,
               volume_in_liters: r.volume_in_liters,
               molar_mass: r.molar_mass,
               moles: r.moles,
               molarity: r.molarity,
               created_at: r.created_at }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Parámetros de `GET /calculations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}
