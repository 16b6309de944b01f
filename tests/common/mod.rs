#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::{App, web};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use roster::database::RosterStore;
use roster::database::models::*;
use roster::database::repositories::CareerOrder;
use roster::services::auth::{Claims, TOKEN_AUDIENCE};
use roster::{AppState, Config, SessionState, handlers};

/// Backend tables held in memory, with switches to make queries fail.
#[derive(Default)]
pub struct Tables {
    pub users: Vec<UserRecord>,
    pub teams: Vec<TeamRecord>,
    pub members: Vec<TeamMemberRecord>,
    pub careers: Vec<CareerEntry>,
    pub order: Vec<DisplayOrderItem>,

    pub fail_display_order: bool,
    pub fail_users: bool,
    pub fail_teams: bool,
    /// Fail member lookups that cover more than one team.
    pub fail_batch_members: bool,
    /// Fail member lookups that include any of these teams.
    pub failing_member_teams: HashSet<Uuid>,

    pub unordered_user_fetches: usize,
    pub unordered_team_fetches: usize,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

fn backend_down() -> sqlx::Error {
    sqlx::Error::Protocol("backend unavailable".to_string())
}

fn limited<T>(rows: Vec<T>, limit: Option<i64>) -> Vec<T> {
    match limit {
        Some(n) => rows.into_iter().take(n as usize).collect(),
        None => rows,
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn add_user(&self, user: UserRecord) -> UserRecord {
        self.tables().users.push(user.clone());
        user
    }

    pub fn add_team(&self, team: TeamRecord) -> TeamRecord {
        self.tables().teams.push(team.clone());
        team
    }

    pub fn add_member(&self, team_id: Uuid, user_id: Uuid) {
        self.tables().members.push(TeamMemberRecord {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            role: None,
            created_at: Utc::now(),
        });
    }

    pub fn add_career(&self, entry: CareerEntry) -> CareerEntry {
        self.tables().careers.push(entry.clone());
        entry
    }

    pub fn rank(&self, item_type: ItemType, item_id: Uuid, display_order: i32) {
        self.tables().order.push(DisplayOrderItem {
            id: Uuid::new_v4(),
            item_type: item_type.as_str().to_string(),
            item_id,
            display_order,
        });
    }
}

impl RosterStore for MemoryStore {
    async fn display_order(
        &self,
        item_type: ItemType,
        limit: Option<i64>,
    ) -> Result<Vec<DisplayOrderItem>, sqlx::Error> {
        let t = self.tables();
        if t.fail_display_order {
            return Err(backend_down());
        }
        let mut rows: Vec<DisplayOrderItem> = t
            .order
            .iter()
            .filter(|o| o.item_type == item_type.as_str())
            .cloned()
            .collect();
        rows.sort_by_key(|o| o.display_order);
        Ok(limited(rows, limit))
    }

    async fn users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserRecord>, sqlx::Error> {
        let t = self.tables();
        if t.fail_users {
            return Err(backend_down());
        }
        Ok(t.users.iter().filter(|u| ids.contains(&u.id)).cloned().collect())
    }

    async fn users_by_type(
        &self,
        user_type: UserType,
        limit: Option<i64>,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        let mut t = self.tables();
        t.unordered_user_fetches += 1;
        if t.fail_users {
            return Err(backend_down());
        }
        let rows = t
            .users
            .iter()
            .filter(|u| u.user_type == user_type.as_str())
            .cloned()
            .collect();
        Ok(limited(rows, limit))
    }

    async fn user_by_slug(&self, slug: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        let t = self.tables();
        if t.fail_users {
            return Err(backend_down());
        }
        Ok(t.users.iter().find(|u| u.slug == slug).cloned())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
        let t = self.tables();
        if t.fail_users {
            return Err(backend_down());
        }
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn active_teams_by_ids(&self, ids: &[Uuid]) -> Result<Vec<TeamRecord>, sqlx::Error> {
        let t = self.tables();
        if t.fail_teams {
            return Err(backend_down());
        }
        Ok(t.teams
            .iter()
            .filter(|team| team.is_active() && ids.contains(&team.id))
            .cloned()
            .collect())
    }

    async fn active_teams(&self, limit: Option<i64>) -> Result<Vec<TeamRecord>, sqlx::Error> {
        let mut t = self.tables();
        t.unordered_team_fetches += 1;
        if t.fail_teams {
            return Err(backend_down());
        }
        let rows = t.teams.iter().filter(|team| team.is_active()).cloned().collect();
        Ok(limited(rows, limit))
    }

    async fn active_team_by_slug(&self, slug: &str) -> Result<Option<TeamRecord>, sqlx::Error> {
        let t = self.tables();
        if t.fail_teams {
            return Err(backend_down());
        }
        Ok(t.teams
            .iter()
            .find(|team| team.is_active() && team.slug == slug)
            .cloned())
    }

    async fn members_for_teams(
        &self,
        team_ids: &[Uuid],
    ) -> Result<Vec<TeamMemberRecord>, sqlx::Error> {
        let t = self.tables();
        if t.fail_batch_members && team_ids.len() > 1 {
            return Err(backend_down());
        }
        if team_ids.iter().any(|id| t.failing_member_teams.contains(id)) {
            return Err(backend_down());
        }
        Ok(t.members
            .iter()
            .filter(|m| team_ids.contains(&m.team_id))
            .cloned()
            .collect())
    }

    async fn memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TeamMemberRecord>, sqlx::Error> {
        let t = self.tables();
        Ok(t.members
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn careers_for_users(
        &self,
        user_ids: &[Uuid],
        order: CareerOrder,
    ) -> Result<Vec<CareerEntry>, sqlx::Error> {
        let t = self.tables();
        let mut rows: Vec<CareerEntry> = t
            .careers
            .iter()
            .filter(|c| user_ids.contains(&c.user_id))
            .cloned()
            .collect();
        match order {
            CareerOrder::DateDesc => {
                rows.sort_by(|a, b| b.single_date.or(b.start_date).cmp(&a.single_date.or(a.start_date)))
            }
            CareerOrder::CreatedDesc => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        Ok(rows)
    }

    async fn create_career(
        &self,
        user_id: Uuid,
        input: &NewCareerEntry,
    ) -> Result<CareerEntry, sqlx::Error> {
        let (single_date, start_date, end_date) = input.date.columns();
        let entry = CareerEntry {
            id: Uuid::new_v4(),
            user_id,
            category: input.category.as_str().to_string(),
            title: input.title.clone(),
            description: input.description.clone(),
            video_url: input.video_url.clone(),
            poster_url: input.poster_url.clone(),
            is_featured: input.is_featured,
            country: input.country.clone(),
            date_type: input.date.date_type().as_str().to_string(),
            single_date,
            start_date,
            end_date,
            created_at: Utc::now(),
        };
        self.tables().careers.push(entry.clone());
        Ok(entry)
    }

    async fn delete_career(&self, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let mut t = self.tables();
        let before = t.careers.len();
        t.careers.retain(|c| !(c.id == id && c.user_id == user_id));
        Ok(t.careers.len() < before)
    }
}

pub fn dancer_record(name: &str, name_en: &str, slug: &str) -> UserRecord {
    UserRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        name_en: Some(name_en.to_string()),
        slug: slug.to_string(),
        profile_image: None,
        introduction: Some(format!("{} introduction", name_en)),
        instagram_url: None,
        youtube_url: None,
        twitter_url: None,
        user_type: "dancer".to_string(),
        created_at: Utc::now(),
    }
}

pub fn staff_record(name: &str, slug: &str) -> UserRecord {
    UserRecord {
        user_type: "staff".to_string(),
        ..dancer_record(name, name, slug)
    }
}

pub fn team_record(name: &str, slug: &str, formed: i32) -> TeamRecord {
    TeamRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        name_ko: None,
        slug: slug.to_string(),
        description: None,
        logo_url: None,
        cover_image: None,
        status: "active".to_string(),
        leader_id: None,
        created_at: Utc.with_ymd_and_hms(formed, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn career(user_id: Uuid, category: &str, title: &str, date: Option<NaiveDate>) -> CareerEntry {
    CareerEntry {
        id: Uuid::new_v4(),
        user_id,
        category: category.to_string(),
        title: title.to_string(),
        description: None,
        video_url: None,
        poster_url: None,
        is_featured: false,
        country: None,
        date_type: "single".to_string(),
        single_date: date,
        start_date: None,
        end_date: None,
        created_at: Utc::now(),
    }
}

/// Actix app over the given store, with every route mounted.
pub fn create_app(
    store: MemoryStore,
    session: SessionState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let config = Config::test_config();
    let state = web::Data::new(AppState::new(store, &config));

    App::new()
        .app_data(state)
        .app_data(web::Data::new(session))
        .app_data(web::Data::new(config))
        .configure(handlers::configure::<MemoryStore>)
}

pub struct AuthHelper;

impl AuthHelper {
    pub fn token_for(user_id: Uuid, expires_in: Duration) -> String {
        let claims = Claims {
            sub: user_id,
            email: Some(format!("{}@example.com", user_id.simple())),
            role: Some("authenticated".to_string()),
            aud: TOKEN_AUDIENCE.to_string(),
            exp: (Utc::now() + expires_in).timestamp() as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(Config::test_config().jwt_secret.as_ref()),
        )
        .unwrap()
    }

    pub fn auth_header(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }
}
