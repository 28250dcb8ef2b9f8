use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let in_memory = is_in_memory(database_url);

    let mut options = ConnectOptions::new(database_url.to_string());
    options.sqlx_logging(false);
    if in_memory {
        // Every pooled connection would otherwise open its own empty database.
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await?;

    if !in_memory {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "PRAGMA journal_mode=WAL".to_string(),
        ))
        .await?;

        db.execute(Statement::from_string(
            db.get_database_backend(),
            "PRAGMA synchronous=NORMAL".to_string(),
        ))
        .await?;
    }

    Migrator::up(&db, None).await?;
    tracing::debug!(in_memory, "database ready");
    Ok(db)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
