mod calculation;
mod calculator;
mod catalog;
mod chemical;
mod domain_repository;
mod errors;
mod history;

pub use calculation::{CalculationRequest, CalculationResult, MolarMassSource, ValidatedCalculation, VolumeUnit,
                      CUSTOM_SUBSTANCE_NAME};
pub use calculator::{compute, MolarityCalculator, ResolvedSubstance};
pub use catalog::{seed_chemicals, ChemicalCatalog, CATALOG_LIST_CAP};
pub use chemical::Chemical;
pub use domain_repository::{CalculationRepository, ChemicalRepository, InMemoryDomainRepository};
pub use errors::DomainError;
pub use history::{clamp_limit, CalculationHistory, HISTORY_DEFAULT_LIMIT, HISTORY_MAX_LIMIT};
