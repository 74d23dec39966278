use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services
/// (e.g., Store, Sessions). It is pulled into the application state via FromRef,
/// embodying the "immutable AppConfig" part of the Unified State Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Whether the in-memory store is seeded with the demo dataset at startup.
    pub seed_demo_data: bool,
    // Runtime environment marker. Controls log format and seeding defaults.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs, demo data) and production behavior (JSON logs, explicit config).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            seed_demo_data: true,
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the **fail-fast**
    /// principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime
    /// environment (especially Production) is not found. This prevents the application
    /// from starting with an incomplete configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // Demo data seeding: on by default locally, opt-in for production.
        let seed_demo_data = match env::var("SEED_DEMO_DATA") {
            Ok(v) => matches!(v.as_str(), "1" | "true" | "yes"),
            Err(_) => env == Env::Local,
        };

        match env {
            Env::Local => Self {
                env: Env::Local,
                bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
                seed_demo_data,
            },
            Env::Production => Self {
                env: Env::Production,
                // Production demands an explicit bind address.
                bind_addr: env::var("BIND_ADDR").expect("FATAL: BIND_ADDR required in prod"),
                seed_demo_data,
            },
        }
    }
}
