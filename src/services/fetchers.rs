use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::database::{
    RosterStore,
    models::{DisplayOrderItem, ItemType, TeamRecord, UserRecord, UserType},
    repositories::CareerOrder,
};
use crate::services::{
    mappers::{
        Dancer, Team, TeamMember, TeamSummary, map_member, map_team_summary, map_team_to_team,
        map_user_to_dancer,
    },
    profile::{DisclosurePolicy, ProfileLimits, ProfileView, build_profile_view},
    ranked::{FallbackPolicy, RankedSource, ranked_fetch},
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistProfile {
    pub dancer: Dancer,
    pub teams: Vec<TeamSummary>,
    pub careers: ProfileView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProfile {
    pub team: Team,
    pub careers: ProfileView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyPage {
    pub user_id: Uuid,
    pub dancer: Option<Dancer>,
    pub careers: ProfileView,
}

struct DancerSource<'a, S> {
    store: &'a S,
}

impl<S: RosterStore> RankedSource for DancerSource<'_, S> {
    type Item = UserRecord;

    fn item_type(&self) -> ItemType {
        ItemType::Artist
    }

    async fn ranks(&self, limit: Option<i64>) -> Result<Vec<DisplayOrderItem>, sqlx::Error> {
        self.store.display_order(ItemType::Artist, limit).await
    }

    async fn fetch_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserRecord>, sqlx::Error> {
        self.store.users_by_ids(ids).await
    }

    async fn fetch_unordered(&self, limit: Option<i64>) -> Result<Vec<UserRecord>, sqlx::Error> {
        self.store.users_by_type(UserType::Dancer, limit).await
    }
}

struct TeamSource<'a, S> {
    store: &'a S,
}

impl<S: RosterStore> RankedSource for TeamSource<'_, S> {
    type Item = TeamRecord;

    fn item_type(&self) -> ItemType {
        ItemType::Team
    }

    async fn ranks(&self, limit: Option<i64>) -> Result<Vec<DisplayOrderItem>, sqlx::Error> {
        self.store.display_order(ItemType::Team, limit).await
    }

    async fn fetch_by_ids(&self, ids: &[Uuid]) -> Result<Vec<TeamRecord>, sqlx::Error> {
        self.store.active_teams_by_ids(ids).await
    }

    async fn fetch_unordered(&self, limit: Option<i64>) -> Result<Vec<TeamRecord>, sqlx::Error> {
        self.store.active_teams(limit).await
    }
}

/// Assembles directory lists and profile pages from the backend.
///
/// List fetches never fail; they degrade per their fallback policy and log.
/// Profile fetches return backend errors to the caller.
#[derive(Clone)]
pub struct RosterFetcher<S> {
    store: S,
    dancer_fallback: FallbackPolicy,
    team_fallback: FallbackPolicy,
    limits: ProfileLimits,
    disclosure: DisclosurePolicy,
}

impl<S: RosterStore> RosterFetcher<S> {
    pub fn new(store: S, dancer_fallback: FallbackPolicy, team_fallback: FallbackPolicy) -> Self {
        Self {
            store,
            dancer_fallback,
            team_fallback,
            limits: ProfileLimits::default(),
            disclosure: DisclosurePolicy::default(),
        }
    }

    pub fn from_config(store: S, config: &Config) -> Self {
        Self::new(store, config.dancer_order_fallback, config.team_order_fallback)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn fetch_dancers(&self) -> Vec<Dancer> {
        let source = DancerSource { store: &self.store };
        ranked_fetch(&source, None, self.dancer_fallback)
            .await
            .iter()
            .map(map_user_to_dancer)
            .collect()
    }

    pub async fn fetch_featured_dancers(&self, limit: usize) -> Vec<Dancer> {
        let source = DancerSource { store: &self.store };
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        ranked_fetch(&source, Some(limit), self.dancer_fallback)
            .await
            .iter()
            .map(map_user_to_dancer)
            .collect()
    }

    pub async fn fetch_teams(&self) -> Vec<Team> {
        let source = TeamSource { store: &self.store };
        let teams = ranked_fetch(&source, None, self.team_fallback).await;
        self.attach_members(teams).await
    }

    /// Dancers and teams, fetched concurrently.
    pub async fn fetch_directory(&self) -> (Vec<Dancer>, Vec<Team>) {
        futures::join!(self.fetch_dancers(), self.fetch_teams())
    }

    async fn attach_members(&self, teams: Vec<TeamRecord>) -> Vec<Team> {
        if teams.is_empty() {
            return Vec::new();
        }

        let all: Vec<&TeamRecord> = teams.iter().collect();
        match self.resolve_members(&all).await {
            Ok(mut by_team) => teams
                .iter()
                .map(|team| map_team_to_team(team, by_team.remove(&team.id).unwrap_or_default()))
                .collect(),
            Err(e) => {
                log::warn!("Batched team member lookup failed ({}), resolving teams one by one", e);

                let mut resolved = Vec::with_capacity(teams.len());
                for team in &teams {
                    match self.resolve_members(&[team]).await {
                        Ok(mut by_team) => resolved.push(map_team_to_team(
                            team,
                            by_team.remove(&team.id).unwrap_or_default(),
                        )),
                        Err(e) => {
                            log::error!("Skipping team {}: error fetching members: {}", team.slug, e)
                        }
                    }
                }
                resolved
            }
        }
    }

    /// Members of each team, keyed by team id, in membership order.
    /// Memberships whose user row is missing are dropped.
    async fn resolve_members(
        &self,
        teams: &[&TeamRecord],
    ) -> Result<HashMap<Uuid, Vec<TeamMember>>, sqlx::Error> {
        let team_ids: Vec<Uuid> = teams.iter().map(|t| t.id).collect();
        let memberships = self.store.members_for_teams(&team_ids).await?;
        if memberships.is_empty() {
            return Ok(HashMap::new());
        }

        let mut seen = HashSet::new();
        let user_ids: Vec<Uuid> = memberships
            .iter()
            .map(|m| m.user_id)
            .filter(|id| seen.insert(*id))
            .collect();
        let users: HashMap<Uuid, UserRecord> = self
            .store
            .users_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        let leaders: HashMap<Uuid, Option<Uuid>> =
            teams.iter().map(|t| (t.id, t.leader_id)).collect();

        let mut by_team: HashMap<Uuid, Vec<TeamMember>> = HashMap::new();
        for membership in &memberships {
            let (Some(user), Some(leader_id)) =
                (users.get(&membership.user_id), leaders.get(&membership.team_id))
            else {
                continue;
            };
            by_team
                .entry(membership.team_id)
                .or_default()
                .push(map_member(user, membership, *leader_id));
        }

        Ok(by_team)
    }

    pub async fn fetch_dancer_profile(
        &self,
        slug: &str,
    ) -> Result<Option<ArtistProfile>, sqlx::Error> {
        let Some(user) = self.store.user_by_slug(slug).await? else {
            return Ok(None);
        };
        if !user.is_dancer() {
            return Ok(None);
        }

        let careers = self
            .store
            .careers_for_users(&[user.id], CareerOrder::DateDesc)
            .await?;

        let memberships = self.store.memberships_for_user(user.id).await?;
        let team_ids: Vec<Uuid> = memberships.iter().map(|m| m.team_id).collect();
        let teams: HashMap<Uuid, TeamRecord> = if team_ids.is_empty() {
            HashMap::new()
        } else {
            self.store
                .active_teams_by_ids(&team_ids)
                .await?
                .into_iter()
                .map(|t| (t.id, t))
                .collect()
        };
        let summaries = memberships
            .iter()
            .filter_map(|m| {
                teams
                    .get(&m.team_id)
                    .map(|team| map_team_summary(team, m.role.clone()))
            })
            .collect();

        Ok(Some(ArtistProfile {
            dancer: map_user_to_dancer(&user),
            teams: summaries,
            careers: build_profile_view(&careers, self.limits, &self.disclosure),
        }))
    }

    pub async fn fetch_team_profile(&self, slug: &str) -> Result<Option<TeamProfile>, sqlx::Error> {
        let Some(team) = self.store.active_team_by_slug(slug).await? else {
            return Ok(None);
        };

        let members = self
            .resolve_members(&[&team])
            .await?
            .remove(&team.id)
            .unwrap_or_default();
        let member_ids: Vec<Uuid> = members.iter().map(|m| m.id).collect();

        let careers = if member_ids.is_empty() {
            Vec::new()
        } else {
            self.store
                .careers_for_users(&member_ids, CareerOrder::DateDesc)
                .await?
        };

        Ok(Some(TeamProfile {
            team: map_team_to_team(&team, members),
            careers: build_profile_view(&careers, self.limits, &self.disclosure),
        }))
    }

    /// The self-service page of an authenticated user. Users without a
    /// `users` row still get their (empty) career view.
    pub async fn fetch_my_page(&self, user_id: Uuid) -> Result<MyPage, sqlx::Error> {
        let user = self.store.user_by_id(user_id).await?;
        let careers = self
            .store
            .careers_for_users(&[user_id], CareerOrder::CreatedDesc)
            .await?;

        Ok(MyPage {
            user_id,
            dancer: user.as_ref().map(map_user_to_dancer),
            careers: build_profile_view(&careers, self.limits, &self.disclosure),
        })
    }
}
