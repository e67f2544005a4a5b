// calculator.rs
use crate::calculation::CUSTOM_SUBSTANCE_NAME;
use crate::{CalculationRequest, CalculationResult, ChemicalCatalog, DomainError, MolarMassSource, ValidatedCalculation};
use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

/// Sustancia con la masa molar ya resuelta.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSubstance {
  pub chemical_id: Option<String>,
  pub name: String,
  pub molar_mass: f64,
  pub custom_molar_mass: Option<f64>,
}

/// Cálculo puro de molaridad. Las magnitudes ya fueron validadas como
/// positivas, por lo que ninguna división puede ser por cero.
pub fn compute(input: &ValidatedCalculation,
               substance: ResolvedSubstance,
               id: String,
               created_at: DateTime<Utc>)
               -> CalculationResult {
  let volume_in_liters = input.volume_unit.to_liters(input.volume);
  let moles = input.mass / substance.molar_mass;
  let molarity = moles / volume_in_liters;
  CalculationResult { id,
                      chemical_id: substance.chemical_id,
                      chemical_name: substance.name,
                      custom_molar_mass: substance.custom_molar_mass,
                      mass: input.mass,
                      volume: input.volume,
                      volume_unit: input.volume_unit,
                      volume_in_liters,
                      molar_mass: substance.molar_mass,
                      moles,
                      molarity,
                      created_at }
}

/// Convierte una petición en un `CalculationResult` nuevo. No persiste nada.
#[derive(Clone)]
pub struct MolarityCalculator {
  catalog: ChemicalCatalog,
}

impl MolarityCalculator {
  pub fn new(catalog: ChemicalCatalog) -> Self {
    Self { catalog }
  }

  pub fn resolve(&self, source: &MolarMassSource) -> Result<ResolvedSubstance, DomainError> {
    match source {
      MolarMassSource::Catalog(chemical_id) => {
        let chemical = self.catalog.get_by_id(chemical_id)?;
        Ok(ResolvedSubstance { chemical_id: Some(chemical.id().to_string()),
                               name: chemical.name().to_string(),
                               molar_mass: chemical.molar_mass(),
                               custom_molar_mass: None })
      }
      MolarMassSource::Custom(molar_mass) => Ok(ResolvedSubstance { chemical_id: None,
                                                                    name: CUSTOM_SUBSTANCE_NAME.to_string(),
                                                                    molar_mass: *molar_mass,
                                                                    custom_molar_mass: Some(*molar_mass) }),
    }
  }

  pub fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult, DomainError> {
    let validated = request.validate()?;
    let substance = self.resolve(&validated.source)?;
    // microsecond precision is what the store keeps
    let created_at = Utc::now().trunc_subsecs(6);
    let result = compute(&validated, substance, Uuid::new_v4().to_string(), created_at);
    ensure_in_range(&result)?;
    Ok(result)
  }
}

/// Rechaza resultados que desbordan o se anulan en punto flotante: `moles` y
/// `molarity` deben quedar finitos y estrictamente positivos.
fn ensure_in_range(result: &CalculationResult) -> Result<(), DomainError> {
  let in_range = |v: f64| v.is_finite() && v > 0.0;
  if in_range(result.moles) && in_range(result.molarity) {
    Ok(())
  } else {
    Err(DomainError::invalid("Calculation result is out of range"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{InMemoryDomainRepository, VolumeUnit};
  use std::sync::Arc;

  fn seeded_calculator() -> MolarityCalculator {
    let catalog = ChemicalCatalog::new(Arc::new(InMemoryDomainRepository::new()));
    catalog.seed_if_empty();
    MolarityCalculator::new(catalog)
  }

  #[test]
  fn sodium_chloride_one_molar() {
    let calc = seeded_calculator();
    let req = CalculationRequest { chemical_id: Some("nacl".into()),
                                   custom_molar_mass: None,
                                   mass: 58.44,
                                   volume: 1.0,
                                   volume_unit: "L".into() };
    let r = calc.calculate(&req).unwrap();
    assert_eq!(r.chemical_id.as_deref(), Some("nacl"));
    assert_eq!(r.chemical_name, "Sodium Chloride (NaCl)");
    assert!((r.moles - 1.0).abs() < 1e-12);
    assert!((r.molarity - 1.0).abs() < 1e-12);
    assert_eq!(r.custom_molar_mass, None);
  }

  #[test]
  fn custom_substance_in_milliliters() {
    let calc = seeded_calculator();
    let req = CalculationRequest { chemical_id: None,
                                   custom_molar_mass: Some(50.0),
                                   mass: 5.0,
                                   volume: 250.0,
                                   volume_unit: "mL".into() };
    let r = calc.calculate(&req).unwrap();
    assert_eq!(r.chemical_name, CUSTOM_SUBSTANCE_NAME);
    assert_eq!(r.volume_unit, VolumeUnit::Milliliter);
    assert!((r.volume_in_liters - 0.25).abs() < 1e-12);
    assert!((r.moles - 0.1).abs() < 1e-12);
    assert!((r.molarity - 0.4).abs() < 1e-12);
    assert_eq!(r.custom_molar_mass, Some(50.0));
  }

  #[test]
  fn unknown_chemical_is_not_found() {
    let calc = seeded_calculator();
    let req = CalculationRequest { chemical_id: Some("unknown".into()),
                                   custom_molar_mass: None,
                                   mass: 1.0,
                                   volume: 1.0,
                                   volume_unit: "L".into() };
    assert!(matches!(calc.calculate(&req), Err(DomainError::NotFound(_))));
  }

  #[test]
  fn compute_is_deterministic() {
    let input = ValidatedCalculation { source: MolarMassSource::Custom(10.0),
                                       mass: 2.0,
                                       volume: 500.0,
                                       volume_unit: VolumeUnit::Milliliter };
    let substance = ResolvedSubstance { chemical_id: None,
                                        name: CUSTOM_SUBSTANCE_NAME.into(),
                                        molar_mass: 10.0,
                                        custom_molar_mass: Some(10.0) };
    let at = Utc::now();
    let a = compute(&input, substance.clone(), "id-1".into(), at);
    let b = compute(&input, substance, "id-1".into(), at);
    assert_eq!(a, b);
    assert!((a.molarity - 0.4).abs() < 1e-12);
  }

  #[test]
  fn overflowing_result_is_rejected() {
    let calc = seeded_calculator();
    let req = CalculationRequest { chemical_id: None,
                                   custom_molar_mass: Some(1e-10),
                                   mass: 1e308,
                                   volume: 1.0,
                                   volume_unit: "L".into() };
    assert_eq!(calc.calculate(&req), Err(DomainError::invalid("Calculation result is out of range")));
  }

  #[test]
  fn underflowing_result_is_rejected() {
    let calc = seeded_calculator();
    let req = CalculationRequest { chemical_id: None,
                                   custom_molar_mass: Some(1e300),
                                   mass: 1e-300,
                                   volume: 1e10,
                                   volume_unit: "L".into() };
    assert_eq!(calc.calculate(&req), Err(DomainError::invalid("Calculation result is out of range")));
  }

  #[test]
  fn padded_chemical_id_is_not_found() {
    let calc = seeded_calculator();
    let req = CalculationRequest { chemical_id: Some(" nacl ".into()),
                                   custom_molar_mass: None,
                                   mass: 58.44,
                                   volume: 1.0,
                                   volume_unit: "L".into() };
    assert!(matches!(calc.calculate(&req), Err(DomainError::NotFound(_))));
  }

  #[test]
  fn generated_ids_are_unique() {
    let calc = seeded_calculator();
    let req = CalculationRequest { chemical_id: Some("kcl".into()),
                                   custom_molar_mass: None,
                                   mass: 7.455,
                                   volume: 100.0,
                                   volume_unit: "mL".into() };
    let a = calc.calculate(&req).unwrap();
    let b = calc.calculate(&req).unwrap();
    assert_ne!(a.id, b.id);
  }
}
