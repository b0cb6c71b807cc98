use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};

mod settings;

#[derive(Debug, Parser)]
#[command(name = "expenses", about = "Expense tracker HTTP backend")]
struct Args {
    /// Settings file name, the extension is optional
    #[arg(short, long, env = "EXPENSES_CONFIG", default_value = "settings")]
    config: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Manage the schema of the configured database
    Migrate {
        #[command(subcommand)]
        action: Option<MigrateAction>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Subcommand)]
enum MigrateAction {
    /// Apply pending migrations
    #[default]
    Up,
    /// Roll back the last applied migration
    Down,
    /// Drop every table and apply all migrations again
    Fresh,
    /// Print applied and pending migrations
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let settings = settings::Settings::new(&args.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expenses={level},server={level},engine={level},sea_orm_migration={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&settings).await,
        Command::Migrate { action } => migrate(&settings.database, action.unwrap_or_default()).await,
    }
}

async fn serve(settings: &settings::Settings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!("Connecting to the database...");
    let db = open(&settings.database).await?;
    if let Err(err) = Migrator::up(&db, None).await {
        tracing::error!("could not migrate the database: {err}");
        return Err(err.into());
    }

    let engine = match engine::Engine::builder().database(db).build().await {
        Ok(engine) => engine,
        Err(err) => {
            tracing::error!("failed to build engine from database: {err}");
            return Err(err.into());
        }
    };

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };

    server::run_with_listener(engine, listener, settings.server.cors).await?;
    Ok(())
}

async fn migrate(
    config: &settings::Database,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let db = open(config).await?;
    let result = match action {
        MigrateAction::Up => Migrator::up(&db, None).await,
        MigrateAction::Down => Migrator::down(&db, Some(1)).await,
        MigrateAction::Fresh => Migrator::fresh(&db).await,
        MigrateAction::Status => Migrator::status(&db).await,
    };
    if let Err(err) = result {
        tracing::error!("migration {action:?} failed: {err}");
        return Err(err.into());
    }
    tracing::info!("migration {action:?} done");
    Ok(())
}

/// Open the configured database.
async fn open(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    match sea_orm::Database::connect(config.url()).await {
        Ok(database) => Ok(database),
        Err(err) => {
            tracing::error!("could not load the database: {err}");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_serves() {
        let args = Args::try_parse_from(["expenses"]).unwrap();
        assert_eq!(args.command, None);
        assert_eq!(args.config, "settings");
    }

    #[test]
    fn migrate_defaults_to_up() {
        let args = Args::try_parse_from(["expenses", "migrate"]).unwrap();
        assert_eq!(args.command, Some(Command::Migrate { action: None }));
    }

    #[test]
    fn migrate_actions_parse() {
        for (raw, action) in [
            ("up", MigrateAction::Up),
            ("down", MigrateAction::Down),
            ("fresh", MigrateAction::Fresh),
            ("status", MigrateAction::Status),
        ] {
            let args =
                Args::try_parse_from(["expenses", "--config", "prod", "migrate", raw]).unwrap();
            assert_eq!(args.config, "prod");
            assert_eq!(
                args.command,
                Some(Command::Migrate {
                    action: Some(action)
                })
            );
        }
        assert!(Args::try_parse_from(["expenses", "migrate", "sideways"]).is_err());
    }
}
