use pbl_server::core::{AppState, Config, DeadlinePolicy};
use pbl_server::create_router;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Inizializza il logging strutturato (RUST_LOG per il filtro)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Carica la configurazione dalle variabili d'ambiente
    let config = Config::from_env().map_err(|e| format!("Configuration error: {}", e))?;
    config.print_info();

    // Crea il pool di connessioni Postgres
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(Duration::from_secs(config.connection_lifetime_secs))
        .connect(&config.database_url)
        .await?;

    // Stato condiviso: repository + policy di scadenza
    let state = Arc::new(AppState::new(
        pool,
        config.jwt_secret.clone(),
        DeadlinePolicy::new(config.group_formation_deadline),
    ));

    // Crea il router (il frontend è una SPA su altra origin)
    let app = create_router(state).layer(CorsLayer::permissive());

    // Definisci l'indirizzo
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    info!("Server listening on http://{}", addr);

    // Crea il listener TCP e avvia il server
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
