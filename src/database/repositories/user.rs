use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{UserRecord, UserType},
    utils::sql,
};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserRecord>, sqlx::Error> {
        let users = sqlx::query_as::<_, UserRecord>(&sql(r#"
            SELECT
                id,
                name,
                name_en,
                slug,
                profile_image,
                introduction,
                instagram_url,
                youtube_url,
                twitter_url,
                "type",
                created_at
            FROM
                users
            WHERE
                id = ANY(?)
        "#))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// All users of a type, in backend order. `limit = None` returns every row.
    pub async fn find_by_type(
        &self,
        user_type: UserType,
        limit: Option<i64>,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        let users = sqlx::query_as::<_, UserRecord>(&sql(r#"
            SELECT
                id,
                name,
                name_en,
                slug,
                profile_image,
                introduction,
                instagram_url,
                youtube_url,
                twitter_url,
                "type",
                created_at
            FROM
                users
            WHERE
                "type" = ?
            LIMIT ?
        "#))
        .bind(user_type.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        let user = sqlx::query_as::<_, UserRecord>(&sql(r#"
            SELECT
                id,
                name,
                name_en,
                slug,
                profile_image,
                introduction,
                instagram_url,
                youtube_url,
                twitter_url,
                "type",
                created_at
            FROM
                users
            WHERE
                slug = ?
        "#))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
        let user = sqlx::query_as::<_, UserRecord>(&sql(r#"
            SELECT
                id,
                name,
                name_en,
                slug,
                profile_image,
                introduction,
                instagram_url,
                youtube_url,
                twitter_url,
                "type",
                created_at
            FROM
                users
            WHERE
                id = ?
        "#))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
