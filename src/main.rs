use chem_api::{router, AppState, ServerConfig};
use chem_persistence::init_dotenv;
use log::{error, info};
use std::error::Error;
use std::sync::Arc;

/// Servidor HTTP del calculador de molaridad.
///
/// Arranque:
/// 1) carga .env y configura el logger (`RUST_LOG`, por defecto `info`)
/// 2) abre el pool y aplica migraciones embebidas
/// 3) siembra el catálogo si está vacío
/// 4) sirve la API hasta recibir Ctrl-C
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let repo = chem_persistence::new_from_env().map_err(|e| {
                                                   error!("no se pudo abrir la base de datos: {}", e);
                                                   Box::new(e) as Box<dyn Error>
                                               })?;
    let repo = Arc::new(repo);
    let state = AppState::new(repo.clone(), repo);

    let catalog = state.catalog.clone();
    tokio::task::spawn_blocking(move || catalog.seed_if_empty()).await?;

    let server = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server.bind_addr()).await?;
    info!("Molarity Calculator API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal())
                                        .await?;
    info!("servidor detenido");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("no se pudo escuchar Ctrl-C: {}", e);
    }
}
