// calculation.rs
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nombre que se registra cuando la masa molar la aporta el usuario.
pub const CUSTOM_SUBSTANCE_NAME: &str = "custom substance";

/// Unidad de volumen aceptada en la petición.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeUnit {
  #[serde(rename = "L")]
  Liter,
  #[serde(rename = "mL")]
  Milliliter,
}

impl VolumeUnit {
  pub fn parse(raw: &str) -> Result<Self, DomainError> {
    match raw {
      "L" => Ok(Self::Liter),
      "mL" => Ok(Self::Milliliter),
      _ => Err(DomainError::invalid("Volume unit must be 'L' or 'mL'")),
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Liter => "L",
      Self::Milliliter => "mL",
    }
  }

  /// Normaliza `volume` (expresado en esta unidad) a litros.
  pub fn to_liters(&self, volume: f64) -> f64 {
    match self {
      Self::Liter => volume,
      Self::Milliliter => volume / 1000.0,
    }
  }
}

impl fmt::Display for VolumeUnit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Origen de la masa molar: referencia al catálogo o valor provisto.
#[derive(Debug, Clone, PartialEq)]
pub enum MolarMassSource {
  Catalog(String),
  Custom(f64),
}

/// Forma de la petición tal como llega por la red. Los campos opcionales se
/// resuelven en `validate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
  #[serde(default)]
  pub chemical_id: Option<String>,
  #[serde(default)]
  pub custom_molar_mass: Option<f64>,
  pub mass: f64,
  pub volume: f64,
  pub volume_unit: String,
}

/// Petición validada: todas las magnitudes son positivas y finitas.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCalculation {
  pub source: MolarMassSource,
  pub mass: f64,
  pub volume: f64,
  pub volume_unit: VolumeUnit,
}

fn is_positive(v: f64) -> bool {
  v.is_finite() && v > 0.0
}

impl CalculationRequest {
  pub fn validate(&self) -> Result<ValidatedCalculation, DomainError> {
    if !is_positive(self.mass) {
      return Err(DomainError::invalid("Mass must be greater than 0"));
    }
    if !is_positive(self.volume) {
      return Err(DomainError::invalid("Volume must be greater than 0"));
    }
    let volume_unit = VolumeUnit::parse(&self.volume_unit)?;
    // blank counts as absent; otherwise the id is looked up exactly as sent
    let chemical_id = self.chemical_id.as_deref().filter(|s| !s.trim().is_empty());
    let source = match (chemical_id, self.custom_molar_mass) {
      (Some(_), Some(_)) => {
        return Err(DomainError::invalid("Provide either chemical_id or custom_molar_mass, not both"));
      }
      (Some(id), None) => MolarMassSource::Catalog(id.to_string()),
      (None, Some(m)) if is_positive(m) => MolarMassSource::Custom(m),
      (None, Some(_)) => return Err(DomainError::invalid("Custom molar mass must be greater than 0")),
      (None, None) => {
        return Err(DomainError::invalid("Either chemical_id or custom_molar_mass must be provided"));
      }
    };
    Ok(ValidatedCalculation { source, mass: self.mass, volume: self.volume, volume_unit })
  }
}

/// Resultado persistible de un cálculo. Se crea una vez y no se modifica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
  pub id: String,
  pub chemical_id: Option<String>,
  pub chemical_name: String,
  pub custom_molar_mass: Option<f64>,
  pub mass: f64,
  pub volume: f64,
  pub volume_unit: VolumeUnit,
  pub volume_in_liters: f64,
  pub molar_mass: f64,
  pub moles: f64,
  pub molarity: f64,
  pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn request(mass: f64, volume: f64, unit: &str) -> CalculationRequest {
    CalculationRequest { chemical_id: None,
                         custom_molar_mass: Some(50.0),
                         mass,
                         volume,
                         volume_unit: unit.into() }
  }

  fn expect_invalid(req: &CalculationRequest, msg: &str) {
    match req.validate() {
      Err(DomainError::InvalidInput(m)) => assert_eq!(m, msg),
      other => panic!("expected InvalidInput({}), got {:?}", msg, other),
    }
  }

  #[test]
  fn non_positive_mass_and_volume_are_rejected() {
    expect_invalid(&request(0.0, 1.0, "L"), "Mass must be greater than 0");
    expect_invalid(&request(-2.0, 1.0, "L"), "Mass must be greater than 0");
    expect_invalid(&request(1.0, 0.0, "L"), "Volume must be greater than 0");
    expect_invalid(&request(1.0, f64::INFINITY, "L"), "Volume must be greater than 0");
  }

  #[test]
  fn unknown_unit_is_rejected() {
    expect_invalid(&request(1.0, 1.0, "ml"), "Volume unit must be 'L' or 'mL'");
    expect_invalid(&request(1.0, 1.0, "gal"), "Volume unit must be 'L' or 'mL'");
  }

  #[test]
  fn molar_mass_source_is_exactly_one() {
    let mut req = request(1.0, 1.0, "mL");
    req.custom_molar_mass = None;
    expect_invalid(&req, "Either chemical_id or custom_molar_mass must be provided");

    req.chemical_id = Some("   ".into());
    expect_invalid(&req, "Either chemical_id or custom_molar_mass must be provided");

    req.chemical_id = Some("nacl".into());
    req.custom_molar_mass = Some(10.0);
    expect_invalid(&req, "Provide either chemical_id or custom_molar_mass, not both");

    req.custom_molar_mass = None;
    let v = req.validate().unwrap();
    assert_eq!(v.source, MolarMassSource::Catalog("nacl".into()));
    assert_eq!(v.volume_unit, VolumeUnit::Milliliter);
  }

  #[test]
  fn padded_chemical_id_is_kept_verbatim() {
    let mut req = request(1.0, 1.0, "L");
    req.custom_molar_mass = None;
    req.chemical_id = Some(" nacl ".into());
    assert_eq!(req.validate().unwrap().source, MolarMassSource::Catalog(" nacl ".into()));
  }

  #[test]
  fn custom_molar_mass_must_be_positive() {
    let mut req = request(1.0, 1.0, "L");
    req.custom_molar_mass = Some(0.0);
    expect_invalid(&req, "Custom molar mass must be greater than 0");
    req.custom_molar_mass = Some(-3.0);
    expect_invalid(&req, "Custom molar mass must be greater than 0");
  }

  #[test]
  fn volume_unit_serializes_with_wire_names() {
    assert_eq!(serde_json::to_string(&VolumeUnit::Milliliter).unwrap(), "\"mL\"");
    assert_eq!(serde_json::from_str::<VolumeUnit>("\"L\"").unwrap(), VolumeUnit::Liter);
    assert_eq!(VolumeUnit::Milliliter.to_liters(250.0), 0.25);
    assert_eq!(VolumeUnit::Liter.to_liters(2.5), 2.5);
  }

  #[test]
  fn request_optional_fields_default_to_none() {
    let req: CalculationRequest =
      serde_json::from_str(r#"{"mass": 5, "volume": 250, "volume_unit": "mL", "custom_molar_mass": 50}"#).unwrap();
    assert_eq!(req.chemical_id, None);
    assert_eq!(req.custom_molar_mass, Some(50.0));
  }
}
