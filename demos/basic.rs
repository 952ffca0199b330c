//! Basic usage example

use nestenv::{Decode, FromEnv};

#[derive(Debug, Default, Decode)]
#[env(case = "upper")]
struct Config {
    // Loaded from DATABASE_URL
    pub database_url: String,

    // Loaded from SERVER_ADDR
    pub server_addr: String,

    // Numeric type
    pub max_connections: u32,

    // Boolean type: 1, t, T, TRUE, true, True and their false counterparts
    pub debug_mode: bool,

    // Optional value, allocated when decoded
    pub log_dir: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");
    std::env::set_var("MAX_CONNECTIONS", "10");
    std::env::set_var("DEBUG_MODE", "F");
    std::env::set_var("LOG_DIR", "${HOME}/logs");

    // Load configuration
    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Log Directory: {:?}", config.log_dir);

    Ok(())
}
