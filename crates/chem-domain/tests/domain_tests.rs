use chem_domain::{CalculationHistory, CalculationRequest, ChemicalCatalog, DomainError, InMemoryDomainRepository,
                  MolarityCalculator};
use std::sync::Arc;

struct Services {
  catalog: ChemicalCatalog,
  calculator: MolarityCalculator,
  history: CalculationHistory,
}

fn services() -> Services {
  let repo = Arc::new(InMemoryDomainRepository::new());
  let catalog = ChemicalCatalog::new(repo.clone());
  catalog.seed_if_empty();
  Services { calculator: MolarityCalculator::new(catalog.clone()), history: CalculationHistory::new(repo), catalog }
}

fn req(chemical_id: Option<&str>, custom: Option<f64>, mass: f64, volume: f64, unit: &str) -> CalculationRequest {
  CalculationRequest { chemical_id: chemical_id.map(String::from),
                       custom_molar_mass: custom,
                       mass,
                       volume,
                       volume_unit: unit.to_string() }
}

#[test]
fn molarity_matches_formula_for_every_catalog_entry() {
  let s = services();
  for chemical in s.catalog.list_all().unwrap() {
    for (volume, unit, liters) in [(2.0, "L", 2.0), (750.0, "mL", 0.75)] {
      let r = s.calculator.calculate(&req(Some(chemical.id()), None, 12.5, volume, unit)).unwrap();
      let expected = (12.5 / chemical.molar_mass()) / liters;
      assert!((r.molarity - expected).abs() < 1e-9, "{}: {} vs {}", chemical.id(), r.molarity, expected);
      assert!(r.molarity.is_finite() && r.molarity > 0.0);
      assert_eq!(r.molar_mass, chemical.molar_mass());
      assert_eq!(r.chemical_name, chemical.name());
    }
  }
}

#[test]
fn invalid_inputs_never_compute() {
  let s = services();
  let cases = [req(None, Some(50.0), 0.0, 1.0, "L"),
               req(None, Some(50.0), 1.0, -1.0, "L"),
               req(None, Some(0.0), 1.0, 1.0, "L"),
               req(None, Some(50.0), 1.0, 1.0, "dL"),
               req(None, None, 1.0, 1.0, "L")];
  for case in cases.iter() {
    match s.calculator.calculate(case) {
      Err(DomainError::InvalidInput(_)) => {}
      other => panic!("expected InvalidInput for {:?}, got {:?}", case, other),
    }
  }
}

#[test]
fn unknown_chemical_leaves_history_untouched() {
  let s = services();
  let outcome = s.calculator.calculate(&req(Some("unknown"), None, 1.0, 1.0, "L"));
  assert_eq!(outcome, Err(DomainError::NotFound("Chemical not found".into())));
  assert!(s.history.list(50).unwrap().is_empty());
}

#[test]
fn stored_result_keeps_captured_name_and_mass() {
  let s = services();
  let r = s.calculator.calculate(&req(Some("glucose"), None, 180.16, 500.0, "mL")).unwrap();
  s.history.save(&r).unwrap();
  let listed = s.history.list(10).unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0], r);
  assert!((listed[0].molarity - 2.0).abs() < 1e-9);
}
