use std::future::Future;

use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{
        CareerEntry, DisplayOrderItem, ItemType, NewCareerEntry, TeamMemberRecord, TeamRecord,
        UserRecord, UserType,
    },
    repositories::{
        CareerOrder, CareerRepository, DisplayOrderRepository, TeamRepository, UserRepository,
    },
};

/// Every backend query the roster services issue. `PgRosterStore` runs them
/// against Postgres; tests substitute an in-memory store.
pub trait RosterStore: Clone + Send + Sync + 'static {
    fn display_order(
        &self,
        item_type: ItemType,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<Vec<DisplayOrderItem>, sqlx::Error>> + Send;

    fn users_by_ids(
        &self,
        ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<UserRecord>, sqlx::Error>> + Send;

    fn users_by_type(
        &self,
        user_type: UserType,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<Vec<UserRecord>, sqlx::Error>> + Send;

    fn user_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, sqlx::Error>> + Send;

    fn user_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<UserRecord>, sqlx::Error>> + Send;

    fn active_teams_by_ids(
        &self,
        ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<TeamRecord>, sqlx::Error>> + Send;

    fn active_teams(
        &self,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<Vec<TeamRecord>, sqlx::Error>> + Send;

    fn active_team_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<TeamRecord>, sqlx::Error>> + Send;

    fn members_for_teams(
        &self,
        team_ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<TeamMemberRecord>, sqlx::Error>> + Send;

    fn memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<TeamMemberRecord>, sqlx::Error>> + Send;

    fn careers_for_users(
        &self,
        user_ids: &[Uuid],
        order: CareerOrder,
    ) -> impl Future<Output = Result<Vec<CareerEntry>, sqlx::Error>> + Send;

    fn create_career(
        &self,
        user_id: Uuid,
        input: &NewCareerEntry,
    ) -> impl Future<Output = Result<CareerEntry, sqlx::Error>> + Send;

    fn delete_career(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;
}

#[derive(Clone)]
pub struct PgRosterStore {
    users: UserRepository,
    teams: TeamRepository,
    careers: CareerRepository,
    display_order: DisplayOrderRepository,
}

impl PgRosterStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            teams: TeamRepository::new(pool.clone()),
            careers: CareerRepository::new(pool.clone()),
            display_order: DisplayOrderRepository::new(pool),
        }
    }
}

impl RosterStore for PgRosterStore {
    async fn display_order(
        &self,
        item_type: ItemType,
        limit: Option<i64>,
    ) -> Result<Vec<DisplayOrderItem>, sqlx::Error> {
        self.display_order.get_ranked(item_type, limit).await
    }

    async fn users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserRecord>, sqlx::Error> {
        self.users.find_by_ids(ids).await
    }

    async fn users_by_type(
        &self,
        user_type: UserType,
        limit: Option<i64>,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        self.users.find_by_type(user_type, limit).await
    }

    async fn user_by_slug(&self, slug: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        self.users.find_by_slug(slug).await
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
        self.users.find_by_id(id).await
    }

    async fn active_teams_by_ids(&self, ids: &[Uuid]) -> Result<Vec<TeamRecord>, sqlx::Error> {
        self.teams.find_active_by_ids(ids).await
    }

    async fn active_teams(&self, limit: Option<i64>) -> Result<Vec<TeamRecord>, sqlx::Error> {
        self.teams.find_active(limit).await
    }

    async fn active_team_by_slug(&self, slug: &str) -> Result<Option<TeamRecord>, sqlx::Error> {
        self.teams.find_active_by_slug(slug).await
    }

    async fn members_for_teams(
        &self,
        team_ids: &[Uuid],
    ) -> Result<Vec<TeamMemberRecord>, sqlx::Error> {
        self.teams.get_members_for_teams(team_ids).await
    }

    async fn memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TeamMemberRecord>, sqlx::Error> {
        self.teams.get_memberships_for_user(user_id).await
    }

    async fn careers_for_users(
        &self,
        user_ids: &[Uuid],
        order: CareerOrder,
    ) -> Result<Vec<CareerEntry>, sqlx::Error> {
        self.careers.find_for_users(user_ids, order).await
    }

    async fn create_career(
        &self,
        user_id: Uuid,
        input: &NewCareerEntry,
    ) -> Result<CareerEntry, sqlx::Error> {
        self.careers.create(user_id, input).await
    }

    async fn delete_career(&self, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        self.careers.delete_owned(id, user_id).await
    }
}
