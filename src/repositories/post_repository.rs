use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::PostStore;
use crate::models::blog_post::BlogPost;
use crate::utils::errors::AppResult;

const POST_COLUMNS: &str =
    "id, slug, title, excerpt, body, cover_image, author, is_published, created_at, updated_at";

pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn list_published(&self, limit: Option<i64>) -> AppResult<Vec<BlogPost>> {
        // LIMIT NULL means no limit in PostgreSQL
        let sql = format!(
            "SELECT {} FROM blog_posts WHERE is_published = TRUE ORDER BY created_at DESC LIMIT $1",
            POST_COLUMNS
        );
        let posts = sqlx::query_as::<_, BlogPost>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn list_all(&self) -> AppResult<Vec<BlogPost>> {
        let sql = format!("SELECT {} FROM blog_posts ORDER BY created_at DESC", POST_COLUMNS);
        let posts = sqlx::query_as::<_, BlogPost>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BlogPost>> {
        let sql = format!("SELECT {} FROM blog_posts WHERE id = $1", POST_COLUMNS);
        let post = sqlx::query_as::<_, BlogPost>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<BlogPost>> {
        let sql = format!("SELECT {} FROM blog_posts WHERE slug = $1", POST_COLUMNS);
        let post = sqlx::query_as::<_, BlogPost>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM blog_posts WHERE slug = $1)")
                .bind(slug)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn insert(&self, post: BlogPost) -> AppResult<BlogPost> {
        let sql = format!(
            r#"
            INSERT INTO blog_posts ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            POST_COLUMNS, POST_COLUMNS
        );
        let post = sqlx::query_as::<_, BlogPost>(&sql)
            .bind(post.id)
            .bind(post.slug)
            .bind(post.title)
            .bind(post.excerpt)
            .bind(post.body)
            .bind(post.cover_image)
            .bind(post.author)
            .bind(post.is_published)
            .bind(post.created_at)
            .bind(post.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(post)
    }

    async fn update(&self, post: BlogPost) -> AppResult<Option<BlogPost>> {
        let sql = format!(
            r#"
            UPDATE blog_posts
            SET slug = $2, title = $3, excerpt = $4, body = $5, cover_image = $6,
                author = $7, is_published = $8, updated_at = $9
            WHERE id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        );
        let post = sqlx::query_as::<_, BlogPost>(&sql)
            .bind(post.id)
            .bind(post.slug)
            .bind(post.title)
            .bind(post.excerpt)
            .bind(post.body)
            .bind(post.cover_image)
            .bind(post.author)
            .bind(post.is_published)
            .bind(post.updated_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
