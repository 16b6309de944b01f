use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{CareerEntry, NewCareerEntry},
    utils::sql,
};

/// Sort orders used by the profile and self-service pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerOrder {
    /// Most recent event date first (`single_date`, else `start_date`).
    DateDesc,
    /// Most recently created first.
    CreatedDesc,
}

#[derive(Clone)]
pub struct CareerRepository {
    pool: PgPool,
}

impl CareerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_for_users(
        &self,
        user_ids: &[Uuid],
        order: CareerOrder,
    ) -> Result<Vec<CareerEntry>, sqlx::Error> {
        let order_by = match order {
            CareerOrder::DateDesc => "COALESCE(single_date, start_date) DESC NULLS LAST, created_at DESC",
            CareerOrder::CreatedDesc => "created_at DESC",
        };

        let query = format!(
            r#"
            SELECT
                id,
                user_id,
                category,
                title,
                description,
                video_url,
                poster_url,
                is_featured,
                country,
                date_type,
                single_date,
                start_date,
                end_date,
                created_at
            FROM
                career_entries
            WHERE
                user_id = ANY(?)
            ORDER BY
                {order_by}
            "#
        );

        let entries = sqlx::query_as::<_, CareerEntry>(&sql(&query))
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        input: &NewCareerEntry,
    ) -> Result<CareerEntry, sqlx::Error> {
        let (single_date, start_date, end_date) = input.date.columns();

        let entry = sqlx::query_as::<_, CareerEntry>(&sql(r#"
            INSERT INTO
                career_entries (
                    id,
                    user_id,
                    category,
                    title,
                    description,
                    video_url,
                    poster_url,
                    is_featured,
                    country,
                    date_type,
                    single_date,
                    start_date,
                    end_date,
                    created_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                user_id,
                category,
                title,
                description,
                video_url,
                poster_url,
                is_featured,
                country,
                date_type,
                single_date,
                start_date,
                end_date,
                created_at
        "#))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(input.category.as_str())
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.video_url)
        .bind(&input.poster_url)
        .bind(input.is_featured)
        .bind(&input.country)
        .bind(input.date.date_type().as_str())
        .bind(single_date)
        .bind(start_date)
        .bind(end_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Deletes an entry owned by `user_id`. Returns `false` when no such
    /// entry exists for that owner.
    pub async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql(r#"
            DELETE FROM career_entries
            WHERE
                id = ?
                AND user_id = ?
        "#))
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
