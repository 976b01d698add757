//! SQLite sink: one `articles` table, replaced wholesale each run.

use crate::error::PersistError;
use crate::models::Article;
use rusqlite::{Connection, params};
use std::path::Path;
use tracing::{info, instrument};

/// Fixed output table name.
pub const TABLE: &str = "articles";

/// Replace the `articles` table with the cleaned collection.
///
/// Drop, create, and insert happen in a single transaction, so readers see
/// either the previous run or this one, never a half-written table.
#[instrument(level = "info", skip(articles), fields(path = %path.display(), count = articles.len()))]
pub fn write_table(
    path: &Path,
    articles: &[Article],
    scraped_at: &str,
) -> Result<(), PersistError> {
    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;

    tx.execute_batch(
        "DROP TABLE IF EXISTS articles;
         CREATE TABLE articles (
             title      TEXT NOT NULL,
             url        TEXT NOT NULL,
             source     TEXT NOT NULL,
             scraped_at TEXT NOT NULL
         );",
    )?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO articles (title, url, source, scraped_at) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for article in articles {
            stmt.execute(params![
                article.title,
                article.url,
                article.source,
                scraped_at
            ])?;
        }
    }
    tx.commit()?;

    info!(table = TABLE, "Replaced article table");
    Ok(())
}
