//! Superficie HTTP del servicio de molaridad.
//!
//! Rutas (todas bajo `/api`):
//! - `GET /` estado del servicio.
//! - `GET /chemicals`, `GET /chemicals/:chemical_id` catálogo.
//! - `POST /calculate` cálculo y registro en el historial.
//! - `GET /calculations?limit=N`, `DELETE /calculations` historial.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use axum::routing::{get, post};
use axum::Router;
use chem_domain::{CalculationHistory, CalculationRepository, ChemicalCatalog, ChemicalRepository, MolarityCalculator};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use config::ServerConfig;
pub use error::ApiError;

/// Prefijo común de todas las rutas.
pub const API_PREFIX: &str = "/api";

/// Servicios compartidos por los handlers. Clonar es barato (solo `Arc`s).
#[derive(Clone)]
pub struct AppState {
    pub catalog: ChemicalCatalog,
    pub calculator: MolarityCalculator,
    pub history: CalculationHistory,
}

impl AppState {
    pub fn new(chemicals: Arc<dyn ChemicalRepository>, calculations: Arc<dyn CalculationRepository>) -> Self {
        let catalog = ChemicalCatalog::new(chemicals);
        Self { calculator: MolarityCalculator::new(catalog.clone()),
               history: CalculationHistory::new(calculations),
               catalog }
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new().route("/", get(handlers::root))
                           .route("/chemicals", get(handlers::list_chemicals))
                           .route("/chemicals/:chemical_id", get(handlers::get_chemical))
                           .route("/calculate", post(handlers::calculate))
                           .route("/calculations",
                                  get(handlers::list_calculations).delete(handlers::clear_calculations));
    // cualquier origen puede consumir la API (frontend servido aparte)
    Router::new().nest(API_PREFIX, api).layer(CorsLayer::permissive()).with_state(state)
}
