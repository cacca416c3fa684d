//! Print the layout of a climate SQLite file before serving it.
//!
//! Usage: `inspect_db [path]` (defaults to `hawaii.sqlite`).

use anyhow::{bail, Context, Result};
use sqlx::Row;
use std::path::PathBuf;

use surfsup::db::{open_pool, validate_schema};

#[tokio::main]
async fn main() -> Result<()> {
    let file_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("hawaii.sqlite"));

    println!("Inspecting SQLite file: {}", file_path.display());

    let pool = open_pool(&file_path, 1)
        .await
        .with_context(|| format!("opening {}", file_path.display()))?;

    println!("\n=== TABLES ===");

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await?;

    if tables.is_empty() {
        bail!("{} contains no tables", file_path.display());
    }

    for table in &tables {
        let count_sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
        let count: i64 = sqlx::query_scalar(&count_sql).fetch_one(&pool).await?;
        println!("\n{} ({} rows)", table, count);

        let columns = sqlx::query("SELECT name, type, \"notnull\" FROM pragma_table_info(?)")
            .bind(table)
            .fetch_all(&pool)
            .await?;
        for column in columns {
            let name: String = column.try_get("name")?;
            let declared: String = column.try_get("type")?;
            let not_null: bool = column.try_get("notnull")?;
            println!(
                "  {} {}{}",
                name,
                declared,
                if not_null { " NOT NULL" } else { "" }
            );
        }
    }

    println!("\n=== SCHEMA CHECK ===");
    match validate_schema(&pool).await {
        Ok(()) => println!("station and measurement tables look servable"),
        Err(e) => println!("NOT servable: {}", e),
    }

    if tables.iter().any(|t| t == "measurement") {
        println!("\nSample measurements:");
        let rows = sqlx::query(
            "SELECT station, date, prcp, tobs FROM measurement ORDER BY date LIMIT 5",
        )
        .fetch_all(&pool)
        .await?;
        for row in rows {
            let station: Option<String> = row.try_get("station")?;
            let date: Option<String> = row.try_get("date")?;
            let prcp: Option<f64> = row.try_get("prcp")?;
            let tobs: Option<f64> = row.try_get("tobs")?;
            println!("  {:?} {:?} prcp={:?} tobs={:?}", station, date, prcp, tobs);
        }
    }

    pool.close().await;
    Ok(())
}

/// Quote a table name for SQL, doubling any embedded double quotes
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
