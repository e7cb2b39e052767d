//! Configuration module
//!
//! Process-wide settings for the remote n8n API, the relational store, the
//! embedding service and the local workflow catalog. Values come from the
//! environment (and an optional `.env` file).

use std::env;
use std::path::PathBuf;

// Common constants
const N8N_HOST: &str = "http://localhost:5678";
const N8N_API_VERSION: &str = "v1";
const POSTGRES_HOST: &str = "localhost";
const POSTGRES_PORT: u16 = 5432;
const POSTGRES_USER: &str = "postgres";
const POSTGRES_DB: &str = "n8n_workflows";
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const EMBEDDING_HOST: &str = "http://localhost:11434";
const EMBEDDING_MODEL: &str = "qwen3-embedding-0.6b";
const HTTP_TIMEOUT_SECS: u64 = 60;
const WORKFLOWS_DIR: &str = "workflows";
const PROCESSED_WORKFLOWS_DIR: &str = "processed-workflows";

/// Remote workflow API settings.
#[derive(Clone, Debug)]
pub struct N8nConfig {
    pub host: String,
    /// Required by the remote gateway; checked when the client is constructed.
    pub api_key: Option<String>,
    pub api_version: String,
    pub timeout_seconds: u64,
}

/// Relational store settings.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub timeout_seconds: u64,
}

/// Embedding service settings.
#[derive(Clone, Debug)]
pub struct EmbeddingConfig {
    pub host: String,
    pub model: String,
    pub timeout_seconds: u64,
}

/// Local raw/enriched workflow directories.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub workflows_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub n8n: N8nConfig,
    pub database: DatabaseConfig,
    pub embedding: EmbeddingConfig,
    pub catalog: CatalogConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let http_timeout_seconds = env::var("HTTP_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| HTTP_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECONDS must be a valid number"))?;

        let n8n = N8nConfig {
            host: env::var("N8N_HOST").unwrap_or_else(|_| N8N_HOST.to_string()),
            api_key: env::var("N8N_API_KEY").ok().filter(|s| !s.is_empty()),
            api_version: env::var("N8N_API_VERSION")
                .unwrap_or_else(|_| N8N_API_VERSION.to_string()),
            timeout_seconds: http_timeout_seconds,
        };

        let database = DatabaseConfig {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| database_url_from_parts()),
            timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
        };

        let embedding = EmbeddingConfig {
            host: env::var("EMBEDDING_HOST").unwrap_or_else(|_| EMBEDDING_HOST.to_string()),
            model: env::var("EMBEDDING_MODEL").unwrap_or_else(|_| EMBEDDING_MODEL.to_string()),
            timeout_seconds: http_timeout_seconds,
        };

        let catalog = CatalogConfig {
            workflows_dir: env::var("WORKFLOWS_DIR")
                .unwrap_or_else(|_| WORKFLOWS_DIR.to_string())
                .into(),
            output_dir: env::var("PROCESSED_WORKFLOWS_DIR")
                .unwrap_or_else(|_| PROCESSED_WORKFLOWS_DIR.to_string())
                .into(),
        };

        let config = Config {
            n8n,
            database,
            embedding,
            catalog,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let url = &self.database.database_url;
        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.n8n.timeout_seconds == 0 || self.embedding.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP_TIMEOUT_SECONDS must be greater than 0"));
        }

        if self.database.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("DB_TIMEOUT_SECONDS must be greater than 0"));
        }

        Ok(())
    }
}

/// Assemble a connection string from the individual `POSTGRES_*` variables.
fn database_url_from_parts() -> String {
    let user = env::var("POSTGRES_USER").unwrap_or_else(|_| POSTGRES_USER.to_string());
    let password = env::var("POSTGRES_PASSWORD").unwrap_or_default();
    let db = env::var("POSTGRES_DB").unwrap_or_else(|_| POSTGRES_DB.to_string());
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| POSTGRES_HOST.to_string());
    let port = env::var("POSTGRES_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(POSTGRES_PORT);

    build_database_url(&user, &password, &host, port, &db)
}

fn build_database_url(user: &str, password: &str, host: &str, port: u16, db: &str) -> String {
    if password.is_empty() {
        format!("postgresql://{}@{}:{}/{}", user, host, port, db)
    } else {
        format!("postgresql://{}:{}@{}:{}/{}", user, password, host, port, db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            n8n: N8nConfig {
                host: N8N_HOST.to_string(),
                api_key: Some("key".to_string()),
                api_version: N8N_API_VERSION.to_string(),
                timeout_seconds: 60,
            },
            database: DatabaseConfig {
                database_url: "postgresql://n8n@localhost:5432/n8n".to_string(),
                timeout_seconds: 30,
            },
            embedding: EmbeddingConfig {
                host: EMBEDDING_HOST.to_string(),
                model: EMBEDDING_MODEL.to_string(),
                timeout_seconds: 60,
            },
            catalog: CatalogConfig {
                workflows_dir: WORKFLOWS_DIR.into(),
                output_dir: PROCESSED_WORKFLOWS_DIR.into(),
            },
        }
    }

    #[test]
    fn build_database_url_with_and_without_password() {
        assert_eq!(
            build_database_url("n8n", "secret", "db", 5433, "flows"),
            "postgresql://n8n:secret@db:5433/flows"
        );
        assert_eq!(
            build_database_url("n8n", "", "localhost", 5432, "flows"),
            "postgresql://n8n@localhost:5432/flows"
        );
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_postgres_url() {
        let mut config = sample_config();
        config.database.database_url = "mysql://localhost/n8n".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeouts() {
        let mut config = sample_config();
        config.embedding.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
