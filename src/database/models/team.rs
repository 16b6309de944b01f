use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub id: Uuid,
    pub name: String,
    pub name_ko: Option<String>,
    pub slug: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub cover_image: Option<String>,
    pub status: String,
    pub leader_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Team statuses stored in `teams.status`. Only active teams are listed.
pub const TEAM_STATUS_ACTIVE: &str = "active";

impl TeamRecord {
    pub fn is_active(&self) -> bool {
        self.status == TEAM_STATUS_ACTIVE
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberRecord {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}
