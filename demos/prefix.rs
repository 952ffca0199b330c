//! Example demonstrating prefix, separator and case attributes

use nestenv::{Decode, FromEnv};

#[derive(Debug, Default, Decode)]
struct Database {
    pub url: String,
    pub pool_size: u32,
}

#[derive(Debug, Default, Decode)]
#[env(prefix = "myapp", separator = "__", case = "upper")]
struct Config {
    // Environment variables are prefixed and upper-cased: MYAPP__API_KEY, MYAPP__PORT, etc.
    pub api_key: String,
    pub port: u16,

    // Nested names are joined by the separator: MYAPP__DATABASE__URL
    pub database: Database,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP__API_KEY", "secret-key-123");
    std::env::set_var("MYAPP__PORT", "3000");
    std::env::set_var("MYAPP__DATABASE__URL", "postgres://localhost/db");
    std::env::set_var("MYAPP__DATABASE__POOL_SIZE", "16");

    let config = Config::from_env()?;

    println!("Configuration with prefix 'MYAPP' and separator '__':");
    println!("  API Key: {}", config.api_key);
    println!("  Port: {}", config.port);
    println!("  Database URL: {}", config.database.url);
    println!("  Database Pool Size: {}", config.database.pool_size);

    Ok(())
}
