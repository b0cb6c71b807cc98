//! Handles settings for the application.
//!
//! Sources, lowest priority first:
//!
//! - built-in defaults;
//! - the optional settings file (`settings.toml` unless `--config` says otherwise);
//! - `EXPENSES__<SECTION>__<KEY>` environment variables;
//! - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS`, `DB_NAME` and `DB_SSLMODE`, which select a
//!   Postgres database as soon as `DB_HOST` is set.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    /// Enable the permissive cross-origin policy.
    pub cors: bool,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
    pub host: String,
    #[serde(default = "default_postgres_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub name: String,
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Database {
    Memory,
    Sqlite { path: String },
    Postgres(Postgres),
}

impl Database {
    /// Connection URL understood by `sea_orm::Database::connect`.
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite { path } => format!("sqlite:{path}?mode=rwc"),
            Database::Postgres(pg) => {
                let credentials = if pg.password.is_empty() {
                    pg.user.clone()
                } else {
                    format!("{}:{}", pg.user, pg.password)
                };
                format!(
                    "postgres://{credentials}@{}:{}/{}?sslmode={}",
                    pg.host, pg.port, pg.name, pg.ssl_mode
                )
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub database: Database,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let db_env = |key: &str| std::env::var(key).ok().filter(|value| !value.is_empty());
        let postgres = db_env("DB_HOST").map(|_| "postgres");

        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.cors", true)?
            .set_default("database.kind", "sqlite")?
            .set_default("database.path", "expenses.db")?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("EXPENSES")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("database.kind", postgres)?
            .set_override_option("database.host", db_env("DB_HOST"))?
            .set_override_option("database.port", db_env("DB_PORT"))?
            .set_override_option("database.user", db_env("DB_USER"))?
            .set_override_option("database.password", db_env("DB_PASS"))?
            .set_override_option("database.name", db_env("DB_NAME"))?
            .set_override_option("database.ssl_mode", db_env("DB_SSLMODE"))?
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_url_creates_missing_file() {
        let db = Database::Sqlite {
            path: "expenses.db".to_string(),
        };
        assert_eq!(db.url(), "sqlite:expenses.db?mode=rwc");
    }

    #[test]
    fn postgres_url_carries_credentials_and_ssl_mode() {
        let db = Database::Postgres(Postgres {
            host: "db".to_string(),
            port: 5433,
            user: "tracker".to_string(),
            password: "secret".to_string(),
            name: "expenses".to_string(),
            ssl_mode: "require".to_string(),
        });
        assert_eq!(
            db.url(),
            "postgres://tracker:secret@db:5433/expenses?sslmode=require"
        );
    }

    #[test]
    fn database_kind_is_tagged() {
        let db: Database = Config::builder()
            .set_default("kind", "postgres")
            .unwrap()
            .set_default("host", "localhost")
            .unwrap()
            .set_default("user", "postgres")
            .unwrap()
            .set_default("name", "expenses")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(db.url(), "postgres://postgres@localhost:5432/expenses?sslmode=disable");
    }
}
