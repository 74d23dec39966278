use optern_portal::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    sessions::{MemorySessions, SessionState},
    store::{MemoryStore, StoreState},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point for the application, responsible for
/// initializing all core components: Configuration, Logging, the in-memory
/// stores, and the HTTP server. There is deliberately no database or external
/// service to connect to — every piece of state lives in this process and is
/// gone when it exits.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    // AppConfig::load() implements the fail-fast principle for missing
    // Production settings.
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Prioritizes the RUST_LOG environment variable, falling back to sensible
    // defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "optern_portal=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    // The structured logging format is dynamically selected based on APP_ENV.
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability during debugging.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by centralized log
            // aggregators. Essential for monitoring.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. In-Memory Store Initialization
    // The demo dataset (sample internships, posts, portal records) is loaded
    // according to configuration; sessions always start empty.
    let store = if config.seed_demo_data {
        tracing::info!("Seeding demo dataset");
        Arc::new(MemoryStore::with_demo_data()) as StoreState
    } else {
        Arc::new(MemoryStore::new()) as StoreState
    };
    let sessions = Arc::new(MemorySessions::new()) as SessionState;

    // 5. Unified State Assembly
    let app_state = AppState {
        store,
        sessions,
        config: config.clone(),
    };

    // 6. Router and Server Startup
    let app = create_router(app_state);

    // Binds the TCP listener and initiates the HTTP server.
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("FATAL: Failed to bind listen address. Check BIND_ADDR.");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on {}", config.bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    // The long-running Axum server process.
    axum::serve(listener, app).await.unwrap();
}
