use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite, SqlitePool};

use crate::{DatabaseError, SqlxResultExt};

/// A catalogue entry. The price is kept as the exact text that was submitted.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    #[sqlx(rename = "nom")]
    pub name: String,
    #[sqlx(rename = "prix")]
    pub price: String,
}

impl Article {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            price: price.into(),
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id != 0
    }

    /// Inserts the article when it has no id yet, otherwise updates the
    /// existing row in place.
    pub async fn save<'e, E: sqlx::Executor<'e, Database = Sqlite>>(
        &mut self,
        executor: E,
    ) -> Result<(), DatabaseError> {
        if self.is_saved() {
            let result = sqlx::query("UPDATE article SET nom = ?, prix = ? WHERE id = ?")
                .bind(&self.name)
                .bind(&self.price)
                .bind(self.id)
                .execute(executor)
                .await
                .map_database_error()?;
            if result.rows_affected() == 0 {
                return Err(DatabaseError::RowNotFound);
            }
        } else {
            self.id = sqlx::query_scalar::<_, i64>(
                "INSERT INTO article (nom, prix) VALUES (?, ?) RETURNING id",
            )
            .bind(&self.name)
            .bind(&self.price)
            .fetch_one(executor)
            .await
            .map_database_error()?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deleted {
    Removed,
    NotFound,
}

/// Owns all reads and writes of the `article` table. Cloning shares the
/// underlying pool.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    pool: SqlitePool,
}

impl ArticleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list(&self) -> Result<Vec<Article>, DatabaseError> {
        sqlx::query_as::<_, Article>("SELECT id, nom, prix FROM article ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_database_error()
    }

    pub async fn find(&self, article_id: i64) -> Result<Option<Article>, DatabaseError> {
        sqlx::query_as::<_, Article>("SELECT id, nom, prix FROM article WHERE id = ?")
            .bind(article_id)
            .fetch_optional(&self.pool)
            .await
            .map_database_error()
    }

    pub async fn create(
        &self,
        name: impl Into<String>,
        price: impl Into<String>,
    ) -> Result<Article, DatabaseError> {
        let mut article = Article::new(name, price);
        article.save(&self.pool).await?;
        Ok(article)
    }

    /// Writes the name and price of an article that already has an id.
    pub async fn update(&self, article: &Article) -> Result<(), DatabaseError> {
        if !article.is_saved() {
            return Err(DatabaseError::RowNotFound);
        }

        article.clone().save(&self.pool).await
    }

    pub async fn delete(&self, article_id: i64) -> Result<Deleted, DatabaseError> {
        let result = sqlx::query("DELETE FROM article WHERE id = ?")
            .bind(article_id)
            .execute(&self.pool)
            .await
            .map_database_error()?;

        Ok(if result.rows_affected() == 0 {
            Deleted::NotFound
        } else {
            Deleted::Removed
        })
    }
}
