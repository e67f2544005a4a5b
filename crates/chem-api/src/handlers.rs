//! Handlers HTTP. Cada petición es independiente; las llamadas al
//! repositorio (bloqueantes) se ejecutan en `spawn_blocking`.

use crate::error::ApiError;
use crate::models::{CalculationResponse, ChemicalResponse, HistoryParams, MessageResponse};
use crate::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use chem_domain::{CalculationRequest, DomainError, HISTORY_DEFAULT_LIMIT};
use log::debug;

async fn run_blocking<T, F>(f: F) -> Result<T, DomainError>
    where F: FnOnce() -> Result<T, DomainError> + Send + 'static,
          T: Send + 'static
{
    tokio::task::spawn_blocking(f).await
                                  .map_err(|e| DomainError::storage(format!("blocking task failed: {e}")))?
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Molarity Calculator API is running"))
}

pub async fn list_chemicals(State(state): State<AppState>) -> Result<Json<Vec<ChemicalResponse>>, ApiError> {
    let catalog = state.catalog.clone();
    let outcome = run_blocking(move || catalog.list_all()).await;
    let chemicals = outcome.map_err(|e| ApiError::from_domain(e, "Error retrieving chemicals"))?;
    Ok(Json(chemicals.iter().map(ChemicalResponse::from).collect()))
}

pub async fn get_chemical(State(state): State<AppState>,
                          Path(chemical_id): Path<String>)
                          -> Result<Json<ChemicalResponse>, ApiError> {
    let catalog = state.catalog.clone();
    let outcome = run_blocking(move || catalog.get_by_id(&chemical_id)).await;
    let chemical = outcome.map_err(|e| ApiError::from_domain(e, "Error retrieving chemical"))?;
    Ok(Json(ChemicalResponse::from(&chemical)))
}

pub async fn calculate(State(state): State<AppState>,
                       payload: Result<Json<CalculationRequest>, JsonRejection>)
                       -> Result<Json<CalculationResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let calculator = state.calculator.clone();
    let history = state.history.clone();
    // nothing is persisted unless the calculation itself succeeded
    let outcome = run_blocking(move || {
                      let result = calculator.calculate(&request)?;
                      history.save(&result)?;
                      Ok(result)
                  }).await;
    let result = outcome.map_err(|e| ApiError::from_domain(e, "Error calculating molarity"))?;
    debug!("calculate: {} -> {} M", result.chemical_name, result.molarity);
    Ok(Json(CalculationResponse::from(result)))
}

pub async fn list_calculations(State(state): State<AppState>,
                               params: Result<Query<HistoryParams>, QueryRejection>)
                               -> Result<Json<Vec<CalculationResponse>>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let limit = params.limit.unwrap_or(HISTORY_DEFAULT_LIMIT);
    let history = state.history.clone();
    let outcome = run_blocking(move || history.list(limit)).await;
    let results = outcome.map_err(|e| ApiError::from_domain(e, "Error retrieving calculations"))?;
    Ok(Json(results.into_iter().map(CalculationResponse::from).collect()))
}

pub async fn clear_calculations(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    let history = state.history.clone();
    let outcome = run_blocking(move || history.clear_all()).await;
    let deleted = outcome.map_err(|e| ApiError::from_domain(e, "Error clearing calculations"))?;
    Ok(Json(MessageResponse::new(format!("Cleared {} calculations", deleted))))
}
