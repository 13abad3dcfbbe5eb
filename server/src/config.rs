//! Configuration, loaded from environment variables with defaults.

use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to.
    pub bind_addr: SocketAddr,
    /// Log level used when RUST_LOG is not set.
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("TODO_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid TODO_BIND_ADDR format");

        let log_level = env::var("TODO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            bind_addr,
            log_level,
        }
    }
}
