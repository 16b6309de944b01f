use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{TeamMemberRecord, TeamRecord, UserRecord};

/// Specialty shown for every mapped artist until the schema stores one.
pub const DANCER_SPECIALTY_PLACEHOLDER: &str = "Dancer";

/// Mock follower count per team member.
pub const FOLLOWERS_PER_MEMBER: u64 = 50_000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Read as-is from the backend.
    Backend,
    /// Computed from backend data.
    Derived,
    /// Stand-in for data the backend does not carry.
    Placeholder,
}

/// A display value tagged with where it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attributed<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Attributed<T> {
    pub fn backend(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Backend,
        }
    }

    pub fn derived(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Derived,
        }
    }

    pub fn placeholder(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Placeholder,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DancerSocial {
    pub instagram: Option<String>,
    pub youtube: Option<String>,
    /// Filled from `twitter_url`; the schema has no TikTok column.
    pub tiktok: Option<Attributed<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dancer {
    pub id: Uuid,
    pub name: String,
    pub name_en: String,
    pub slug: String,
    pub profile_image: Option<String>,
    pub bio: String,
    pub specialty: Attributed<String>,
    pub verified: Attributed<bool>,
    pub monthly_listeners: Option<u64>,
    pub social: DancerSocial,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub name_en: String,
    pub slug: String,
    pub profile_image: Option<String>,
    pub role: Option<String>,
    pub is_leader: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub name_ko: String,
    pub slug: String,
    pub description: String,
    pub logo: Option<String>,
    pub cover_image: Option<String>,
    pub leader_id: Option<Uuid>,
    pub formed_year: Option<Attributed<i32>>,
    pub member_count: usize,
    pub followers: Option<Attributed<u64>>,
    pub members: Vec<TeamMember>,
}

/// A team as listed on an artist's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: Uuid,
    pub name: String,
    pub name_ko: String,
    pub slug: String,
    pub logo: Option<String>,
    pub role: Option<String>,
}

pub fn map_user_to_dancer(user: &UserRecord) -> Dancer {
    Dancer {
        id: user.id,
        name: user.name.clone(),
        name_en: user.name_en.clone().unwrap_or_default(),
        slug: user.slug.clone(),
        profile_image: user.profile_image.clone(),
        bio: user.introduction.clone().unwrap_or_default(),
        specialty: Attributed::placeholder(DANCER_SPECIALTY_PLACEHOLDER.to_string()),
        verified: Attributed::placeholder(true),
        monthly_listeners: None,
        social: DancerSocial {
            instagram: user.instagram_url.clone(),
            youtube: user.youtube_url.clone(),
            tiktok: user.twitter_url.clone().map(Attributed::placeholder),
        },
    }
}

pub fn map_member(
    user: &UserRecord,
    membership: &TeamMemberRecord,
    leader_id: Option<Uuid>,
) -> TeamMember {
    TeamMember {
        id: user.id,
        name: user.name.clone(),
        name_en: user.name_en.clone().unwrap_or_default(),
        slug: user.slug.clone(),
        profile_image: user.profile_image.clone(),
        role: membership.role.clone(),
        is_leader: leader_id == Some(user.id),
    }
}

pub fn map_team_to_team(team: &TeamRecord, members: Vec<TeamMember>) -> Team {
    let member_count = members.len();

    Team {
        id: team.id,
        name: team.name.clone(),
        name_ko: team.name_ko.clone().unwrap_or_default(),
        slug: team.slug.clone(),
        description: team.description.clone().unwrap_or_default(),
        logo: team.logo_url.clone(),
        cover_image: team.cover_image.clone(),
        leader_id: team.leader_id,
        formed_year: Some(Attributed::derived(team.created_at.year())),
        member_count,
        followers: Some(Attributed::placeholder(
            member_count as u64 * FOLLOWERS_PER_MEMBER,
        )),
        members,
    }
}

pub fn map_team_summary(team: &TeamRecord, role: Option<String>) -> TeamSummary {
    TeamSummary {
        id: team.id,
        name: team.name.clone(),
        name_ko: team.name_ko.clone().unwrap_or_default(),
        slug: team.slug.clone(),
        logo: team.logo_url.clone(),
        role,
    }
}
