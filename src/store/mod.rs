//! Persistent recipe store using SQLite.
//!
//! Records are keyed by detail URL. Upserts overwrite every scraped field,
//! bump `scrape_count` and leave `created_at` as it was on first insert.
//!
//! The store handle is constructed explicitly at run start and closed at run
//! end; nothing here is process-global.

use std::collections::HashSet;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, warn};

mod errors;

pub use errors::{StoreError, StoreResult};

use crate::dedup::ExistingKeys;
use crate::extractor::{Ingredient, RecipeRecord};

/// SQLite caps bound parameters per statement; lookups are chunked below it
const LOOKUP_CHUNK: usize = 500;

fn schema_sql(table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {table} (
    detail_url TEXT PRIMARY KEY,
    title TEXT NOT NULL DEFAULT '',
    main_image TEXT NOT NULL DEFAULT '',
    main_ingredients TEXT NOT NULL DEFAULT '',
    eating_method TEXT NOT NULL DEFAULT '',
    cooking_method TEXT NOT NULL DEFAULT '',
    -- JSON array of {{"name", "amount"}}
    ingredients TEXT NOT NULL DEFAULT '[]',
    category TEXT NOT NULL DEFAULT '',
    scrape_count INTEGER NOT NULL DEFAULT 0,
    -- unix milliseconds
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_{table}_category ON {table}(category);
"#
    )
}

/// Insert/update counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    pub inserted: usize,
    pub modified: usize,
    pub failed: usize,
}

/// Keyed recipe collection backed by a SQLite pool
#[derive(Clone)]
pub struct RecipeStore {
    pool: SqlitePool,
    table: String,
}

impl RecipeStore {
    /// Open (creating if missing) the database at `url` and ensure `table` exists.
    ///
    /// `table` must already be a validated identifier; `ScrapeConfig` checks it.
    pub async fn open(url: &str, table: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|source| StoreError::InvalidUrl {
                url: url.to_string(),
                source,
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        sqlx::query(&schema_sql(table)).execute(&pool).await?;
        debug!("Recipe store ready: table {}", table);

        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }

    /// Upsert every record concurrently and report the counts.
    ///
    /// Failures are logged per record and counted in `failed`; they never
    /// abort the rest of the batch.
    pub async fn upsert_batch(&self, records: &[RecipeRecord]) -> UpsertSummary {
        if records.is_empty() {
            return UpsertSummary::default();
        }

        info!("Store upsert started: {} records", records.len());
        let results = join_all(records.iter().map(|r| self.upsert(r))).await;

        let mut summary = UpsertSummary::default();
        for (record, result) in records.iter().zip(results) {
            match result {
                Ok(true) => summary.inserted += 1,
                Ok(false) => summary.modified += 1,
                Err(e) => {
                    warn!("Upsert failed for {}: {}", record.detail_url, e);
                    summary.failed += 1;
                }
            }
        }
        info!(
            "Store upsert finished: inserted={}, modified={}, failed={}",
            summary.inserted, summary.modified, summary.failed
        );
        summary
    }

    /// Upsert one record. Returns `true` when it was newly inserted.
    pub async fn upsert(&self, record: &RecipeRecord) -> StoreResult<bool> {
        let ingredients = serde_json::to_string(&record.ingredients)?;
        let now = Utc::now().timestamp_millis();
        let table = &self.table;

        let sql = format!(
            r#"
            INSERT INTO {table} (
                detail_url, title, main_image, main_ingredients, eating_method,
                cooking_method, ingredients, category, scrape_count, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)
            ON CONFLICT(detail_url) DO UPDATE SET
                title = excluded.title,
                main_image = excluded.main_image,
                main_ingredients = excluded.main_ingredients,
                eating_method = excluded.eating_method,
                cooking_method = excluded.cooking_method,
                ingredients = excluded.ingredients,
                category = excluded.category,
                scrape_count = {table}.scrape_count + 1,
                updated_at = excluded.updated_at
            RETURNING scrape_count
            "#
        );

        let (scrape_count,): (i64,) = sqlx::query_as(&sql)
            .bind(&record.detail_url)
            .bind(&record.title)
            .bind(&record.main_image)
            .bind(&record.main_ingredients)
            .bind(&record.eating_method)
            .bind(&record.cooking_method)
            .bind(&ingredients)
            .bind(&record.category)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(scrape_count == 1)
    }

    /// Batch check which URLs are already stored.
    pub async fn filter_existing(&self, urls: &[String]) -> StoreResult<HashSet<String>> {
        let mut existing = HashSet::new();

        for chunk in urls.chunks(LOOKUP_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let query_str = format!(
                "SELECT detail_url FROM {} WHERE detail_url IN ({placeholders})",
                self.table
            );

            let mut query = sqlx::query(&query_str);
            for url in chunk {
                query = query.bind(url);
            }

            let rows = query.fetch_all(&self.pool).await?;

            for row in rows {
                existing.insert(row.try_get::<String, _>("detail_url")?);
            }
        }

        Ok(existing)
    }

    /// Load one stored record, including store-maintained fields.
    pub async fn get(&self, detail_url: &str) -> StoreResult<Option<RecipeRecord>> {
        let sql = format!(
            "SELECT detail_url, title, main_image, main_ingredients, eating_method, \
             cooking_method, ingredients, category, scrape_count, created_at \
             FROM {} WHERE detail_url = ?",
            self.table
        );

        let Some(row) = sqlx::query(&sql)
            .bind(detail_url)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let ingredients: Vec<Ingredient> =
            serde_json::from_str(&row.try_get::<String, _>("ingredients")?)?;
        let created_at: i64 = row.try_get("created_at")?;

        Ok(Some(RecipeRecord {
            title: row.try_get("title")?,
            main_image: row.try_get("main_image")?,
            main_ingredients: row.try_get("main_ingredients")?,
            eating_method: row.try_get("eating_method")?,
            cooking_method: row.try_get("cooking_method")?,
            ingredients,
            detail_url: row.try_get("detail_url")?,
            category: row.try_get("category")?,
            scrape_count: Some(row.try_get("scrape_count")?),
            created_at: DateTime::<Utc>::from_timestamp_millis(created_at),
        }))
    }

    /// Total number of stored records.
    pub async fn count(&self) -> StoreResult<i64> {
        let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", self.table))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Close the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl ExistingKeys for RecipeStore {
    fn existing_urls(
        &self,
        urls: &[String],
    ) -> impl std::future::Future<Output = anyhow::Result<HashSet<String>>> + Send {
        async move { Ok(self.filter_existing(urls).await?) }
    }
}
