use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the `users` table. Artists and staff share this table and are
/// told apart by `user_type`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub profile_image: Option<String>,
    pub introduction: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub twitter_url: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub user_type: String,
    pub created_at: DateTime<Utc>,
}

/// User types the roster lists. Staff and other rows keep their raw `type`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Dancer,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Dancer => "dancer",
        }
    }
}

impl UserRecord {
    pub fn is_dancer(&self) -> bool {
        self.user_type == UserType::Dancer.as_str()
    }
}
