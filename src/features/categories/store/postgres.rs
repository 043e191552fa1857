use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{CategoryStore, CategoryTx, StoreError, StoreResult};
use crate::features::categories::models::{Category, CategoryFilter, ParentFilter};

/// Map constraint violations onto store error kinds
fn classify(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        // unique_violation
        if db_err.code().as_deref() == Some("23505") {
            return StoreError::DuplicateSlug;
        }
        // foreign_key_violation
        if db_err.code().as_deref() == Some("23503") {
            return StoreError::MissingParent;
        }
    }
    StoreError::Database(e)
}

/// Escape LIKE metacharacters so the needle matches literally
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Postgres-backed category store
#[derive(Debug, Clone)]
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn CategoryTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgCategoryTx { tx }))
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as!(
            Category,
            r#"
            SELECT id, name, slug, description, image, parent_id, level, path, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn get_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as!(
            Category,
            r#"
            SELECT id, name, slug, description, image, parent_id, level, path, created_at, updated_at
            FROM categories
            WHERE slug = $1
            "#,
            slug
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn scan(&self, filter: CategoryFilter) -> StoreResult<Vec<Category>> {
        let roots_only = matches!(filter.parent, Some(ParentFilter::Root));
        let parent_id = match filter.parent {
            Some(ParentFilter::Id(id)) => Some(id),
            _ => None,
        };

        let categories = sqlx::query_as!(
            Category,
            r#"
            SELECT id, name, slug, description, image, parent_id, level, path, created_at, updated_at
            FROM categories
            WHERE (NOT $1::bool OR parent_id IS NULL)
              AND ($2::uuid IS NULL OR parent_id = $2)
              AND ($3::int4 IS NULL OR level = $3)
            ORDER BY name ASC, id ASC
            "#,
            roots_only,
            parent_id,
            filter.level
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn scan_all(&self) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as!(
            Category,
            r#"
            SELECT id, name, slug, description, image, parent_id, level, path, created_at, updated_at
            FROM categories
            ORDER BY level ASC, name ASC, id ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn search_by_pattern(&self, needle: &str) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as!(
            Category,
            r#"
            SELECT id, name, slug, description, image, parent_id, level, path, created_at, updated_at
            FROM categories
            WHERE name ILIKE $1 OR description ILIKE $1
            ORDER BY name ASC, id ASC
            "#,
            like_pattern(needle)
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn count_associations(&self, category_id: Uuid) -> StoreResult<i64> {
        let count = sqlx::query_scalar!(
            r#"SELECT COUNT(*) as "count!" FROM post_categories WHERE category_id = $1"#,
            category_id
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

/// Write transaction; rows read through it are locked until commit or rollback
pub struct PgCategoryTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CategoryTx for PgCategoryTx {
    async fn get(&mut self, id: Uuid) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as!(
            Category,
            r#"
            SELECT id, name, slug, description, image, parent_id, level, path, created_at, updated_at
            FROM categories
            WHERE id = $1
            FOR UPDATE
            "#,
            id
        )
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(category)
    }

    async fn children(&mut self, parent_id: Uuid) -> StoreResult<Vec<Category>> {
        let children = sqlx::query_as!(
            Category,
            r#"
            SELECT id, name, slug, description, image, parent_id, level, path, created_at, updated_at
            FROM categories
            WHERE parent_id = $1
            ORDER BY name ASC, id ASC
            FOR UPDATE
            "#,
            parent_id
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(children)
    }

    async fn create(&mut self, category: &Category) -> StoreResult<Category> {
        sqlx::query_as!(
            Category,
            r#"
            INSERT INTO categories
                (id, name, slug, description, image, parent_id, level, path, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, slug, description, image, parent_id, level, path, created_at, updated_at
            "#,
            category.id,
            &category.name,
            &category.slug,
            category.description.as_deref(),
            category.image.as_deref(),
            category.parent_id,
            category.level,
            &category.path,
            category.created_at,
            category.updated_at
        )
        .fetch_one(&mut *self.tx)
        .await
        .map_err(classify)
    }

    async fn save(&mut self, category: &Category) -> StoreResult<Category> {
        sqlx::query_as!(
            Category,
            r#"
            UPDATE categories
            SET name = $2,
                slug = $3,
                description = $4,
                image = $5,
                parent_id = $6,
                level = $7,
                path = $8,
                updated_at = $9
            WHERE id = $1
            RETURNING id, name, slug, description, image, parent_id, level, path, created_at, updated_at
            "#,
            category.id,
            &category.name,
            &category.slug,
            category.description.as_deref(),
            category.image.as_deref(),
            category.parent_id,
            category.level,
            &category.path,
            category.updated_at
        )
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(classify)?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&mut self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query!(r#"DELETE FROM categories WHERE id = $1"#, id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| match classify(e) {
                StoreError::MissingParent => StoreError::StillReferenced,
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("beach"), "%beach%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
