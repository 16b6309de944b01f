use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{TEAM_STATUS_ACTIVE, TeamMemberRecord, TeamRecord},
    utils::sql,
};

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_active_by_ids(&self, ids: &[Uuid]) -> Result<Vec<TeamRecord>, sqlx::Error> {
        let teams = sqlx::query_as::<_, TeamRecord>(&sql(r#"
            SELECT
                id,
                name,
                name_ko,
                slug,
                description,
                logo_url,
                cover_image,
                status,
                leader_id,
                created_at
            FROM
                teams
            WHERE
                id = ANY(?)
                AND status = ?
        "#))
        .bind(ids)
        .bind(TEAM_STATUS_ACTIVE)
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn find_active(&self, limit: Option<i64>) -> Result<Vec<TeamRecord>, sqlx::Error> {
        let teams = sqlx::query_as::<_, TeamRecord>(&sql(r#"
            SELECT
                id,
                name,
                name_ko,
                slug,
                description,
                logo_url,
                cover_image,
                status,
                leader_id,
                created_at
            FROM
                teams
            WHERE
                status = ?
            LIMIT ?
        "#))
        .bind(TEAM_STATUS_ACTIVE)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn find_active_by_slug(&self, slug: &str) -> Result<Option<TeamRecord>, sqlx::Error> {
        let team = sqlx::query_as::<_, TeamRecord>(&sql(r#"
            SELECT
                id,
                name,
                name_ko,
                slug,
                description,
                logo_url,
                cover_image,
                status,
                leader_id,
                created_at
            FROM
                teams
            WHERE
                slug = ?
                AND status = ?
        "#))
        .bind(slug)
        .bind(TEAM_STATUS_ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    // Team member lookups
    pub async fn get_members_for_teams(
        &self,
        team_ids: &[Uuid],
    ) -> Result<Vec<TeamMemberRecord>, sqlx::Error> {
        let members = sqlx::query_as::<_, TeamMemberRecord>(&sql(r#"
            SELECT
                id,
                team_id,
                user_id,
                role,
                created_at
            FROM
                team_members
            WHERE
                team_id = ANY(?)
            ORDER BY
                created_at
        "#))
        .bind(team_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    pub async fn get_memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TeamMemberRecord>, sqlx::Error> {
        let members = sqlx::query_as::<_, TeamMemberRecord>(&sql(r#"
            SELECT
                id,
                team_id,
                user_id,
                role,
                created_at
            FROM
                team_members
            WHERE
                user_id = ?
            ORDER BY
                created_at
        "#))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}
