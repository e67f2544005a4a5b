use crate::{CalculationResult, Chemical, DomainError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Operaciones de persistencia del catálogo de especies químicas.
pub trait ChemicalRepository: Send + Sync {
    /// Número de especies almacenadas.
    fn count_chemicals(&self) -> Result<u64, DomainError>;

    /// Inserta un lote de especies y devuelve cuántas se insertaron.
    fn insert_chemicals(&self, chemicals: &[Chemical]) -> Result<usize, DomainError>;

    /// Lista como máximo `limit` especies, sin orden garantizado.
    fn list_chemicals(&self, limit: usize) -> Result<Vec<Chemical>, DomainError>;

    /// Busca una especie por su identificador exacto.
    fn get_chemical(&self, id: &str) -> Result<Option<Chemical>, DomainError>;
}

/// Operaciones de persistencia del historial de cálculos (solo anexar).
pub trait CalculationRepository: Send + Sync {
    /// Guarda un resultado y devuelve su identificador de almacenamiento.
    fn save_calculation(&self, result: &CalculationResult) -> Result<String, DomainError>;

    /// Devuelve hasta `limit` resultados, del más reciente al más antiguo.
    /// Con `created_at` empatado se ordena por `id` descendente.
    fn list_calculations(&self, limit: usize) -> Result<Vec<CalculationResult>, DomainError>;

    /// Elimina todo el historial y devuelve la cantidad eliminada.
    fn delete_all_calculations(&self) -> Result<u64, DomainError>;
}

/// Implementación en memoria para tests y desarrollo.
pub struct InMemoryDomainRepository {
    chemicals: Arc<Mutex<HashMap<String, Chemical>>>,
    calculations: Arc<Mutex<Vec<CalculationResult>>>,
}

impl InMemoryDomainRepository {
    pub fn new() -> Self {
        Self { chemicals: Arc::new(Mutex::new(HashMap::new())),
               calculations: Arc::new(Mutex::new(Vec::new())) }
    }

    // Helper to map poisoned mutex errors into DomainError
    fn lock_map<'a, T>(&'a self, m: &'a Mutex<T>, name: &str) -> Result<std::sync::MutexGuard<'a, T>, DomainError> {
        m.lock()
         .map_err(|e| DomainError::storage(format!("Mutex '{}' poisoned: {}", name, e)))
    }
}

impl ChemicalRepository for InMemoryDomainRepository {
    fn count_chemicals(&self) -> Result<u64, DomainError> {
        let chemicals = self.lock_map(&self.chemicals, "chemicals")?;
        Ok(chemicals.len() as u64)
    }

    fn insert_chemicals(&self, batch: &[Chemical]) -> Result<usize, DomainError> {
        let mut chemicals = self.lock_map(&self.chemicals, "chemicals")?;
        if let Some(dup) = batch.iter().find(|c| chemicals.contains_key(c.id())) {
            return Err(DomainError::storage(format!("duplicate chemical id: {}", dup.id())));
        }
        for c in batch {
            chemicals.insert(c.id().to_string(), c.clone());
        }
        Ok(batch.len())
    }

    fn list_chemicals(&self, limit: usize) -> Result<Vec<Chemical>, DomainError> {
        let chemicals = self.lock_map(&self.chemicals, "chemicals")?;
        Ok(chemicals.values().take(limit).cloned().collect())
    }

    fn get_chemical(&self, id: &str) -> Result<Option<Chemical>, DomainError> {
        let chemicals = self.lock_map(&self.chemicals, "chemicals")?;
        Ok(chemicals.get(id).cloned())
    }
}

impl CalculationRepository for InMemoryDomainRepository {
    fn save_calculation(&self, result: &CalculationResult) -> Result<String, DomainError> {
        let mut calculations = self.lock_map(&self.calculations, "calculations")?;
        calculations.push(result.clone());
        Ok(result.id.clone())
    }

    fn list_calculations(&self, limit: usize) -> Result<Vec<CalculationResult>, DomainError> {
        let calculations = self.lock_map(&self.calculations, "calculations")?;
        let mut sorted: Vec<CalculationResult> = calculations.clone();
        // ties on created_at fall back to id, descending
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        sorted.truncate(limit);
        Ok(sorted)
    }

    fn delete_all_calculations(&self) -> Result<u64, DomainError> {
        let mut calculations = self.lock_map(&self.calculations, "calculations")?;
        let deleted = calculations.len() as u64;
        calculations.clear();
        Ok(deleted)
    }
}

impl Default for InMemoryDomainRepository {
    fn default() -> Self {
        Self::new()
    }
}
