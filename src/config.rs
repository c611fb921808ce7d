use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::security::AdminCredentials;

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` selects the stateless fallback backend.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub pool_timeout: Duration,
    pub admin: AdminCredentials,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = non_empty_var("DATABASE_URL").or_else(assemble_database_url);

        let host = non_empty_var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);

        let max_connections = env::var("MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        let pool_timeout_secs: u64 = env::var("POOL_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);

        let admin = AdminCredentials::new(non_empty_var("ADMIN_USERNAME"), non_empty_var("ADMIN_PASSWORD"));

        let log_dir = non_empty_var("LOG_DIR").map(PathBuf::from);

        Ok(Config {
            database_url,
            host,
            port,
            max_connections,
            pool_timeout: Duration::from_secs(pool_timeout_secs),
            admin,
            log_dir,
        })
    }

    /// Configuration for the fallback backend with the given admin secrets.
    pub fn without_database(admin: AdminCredentials) -> Self {
        Config {
            database_url: None,
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_connections: 10,
            pool_timeout: Duration::from_secs(5),
            admin,
            log_dir: None,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|e| anyhow::anyhow!("Invalid socket address: {}", e))
    }
}

/// Empty values count as unset.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// Only used when DATABASE_URL is absent; without DB_HOST there is no database.
fn assemble_database_url() -> Option<String> {
    let db_host = non_empty_var("DB_HOST")?;
    let db_port = non_empty_var("DB_PORT").unwrap_or_else(|| "5432".to_string());
    let db_name = non_empty_var("DB_NAME").unwrap_or_else(|| "postgres".to_string());
    let db_user = non_empty_var("DB_USER").unwrap_or_else(|| "postgres".to_string());
    let db_password = env::var("DB_PASSWORD").unwrap_or_default();

    Some(build_database_url(&db_user, &db_password, &db_host, &db_port, &db_name))
}

fn build_database_url(user: &str, password: &str, host: &str, port: &str, name: &str) -> String {
    // URL-encode password to handle special characters
    let encoded_password = urlencoding::encode(password);
    format!("postgres://{}:{}@{}:{}/{}", user, encoded_password, host, port, name)
}
