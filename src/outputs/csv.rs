//! CSV sink: full overwrite, header row, one line per cleaned article.

use crate::error::PersistError;
use crate::models::Article;
use std::path::Path;
use tracing::{info, instrument};

/// Column order, mirrored by the SQLite table.
pub const HEADER: [&str; 3] = ["title", "url", "source"];

/// Write the cleaned collection to `path`, replacing any previous file.
///
/// The header row is written even for an empty collection, so downstream
/// consumers always see the schema.
#[instrument(level = "info", skip(articles), fields(path = %path.display(), count = articles.len()))]
pub fn write_csv(path: &Path, articles: &[Article]) -> Result<(), PersistError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(HEADER)?;
    for article in articles {
        writer.write_record([&article.title, &article.url, &article.source])?;
    }
    writer.flush()?;

    info!("Wrote article CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_articles() -> Vec<Article> {
        vec![
            Article {
                title: "Covid vaccine rollout begins".to_string(),
                url: "https://example.com/news/story-1".to_string(),
                source: "Example News".to_string(),
            },
            Article {
                title: "Markets rally, analysts \"surprised\"".to_string(),
                url: "https://example.com/news/story-2".to_string(),
                source: "Example News".to_string(),
            },
        ]
    }

    #[test]
    fn test_write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.csv");

        write_csv(&path, &sample_articles()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(vec!["title", "url", "source"])
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "Covid vaccine rollout begins");
        assert_eq!(&rows[1][0], "Markets rally, analysts \"surprised\"");
    }

    #[test]
    fn test_rewrite_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.csv");

        write_csv(&path, &sample_articles()).unwrap();
        write_csv(&path, &sample_articles()[..1]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 1);
    }

    #[test]
    fn test_empty_collection_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.csv");

        write_csv(&path, &[]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("title,url,source"));
    }
}
