//! Fetching items in the order given by the `display_order_items` table.
//!
//! The ordering table only holds ids and ranks. A ranked fetch reads the
//! ranks, loads the referenced rows, then restores rank order client side,
//! dropping ids whose row is gone. What happens when no ranking is available
//! is decided by a [`FallbackPolicy`].

use std::collections::HashMap;
use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{DisplayOrderItem, ItemType, TeamRecord, UserRecord};

/// What to return when the ordering query fails or yields no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Fetch the items without ranking, in backend order.
    Unordered,
    /// Return an empty list.
    Empty,
}

#[derive(Debug, Error)]
#[error("Unknown fallback policy '{0}', expected 'unordered' or 'empty'")]
pub struct UnknownFallbackPolicy(String);

impl std::str::FromStr for FallbackPolicy {
    type Err = UnknownFallbackPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unordered" => Ok(FallbackPolicy::Unordered),
            "empty" => Ok(FallbackPolicy::Empty),
            _ => Err(UnknownFallbackPolicy(s.to_string())),
        }
    }
}

pub trait Ranked {
    fn rank_id(&self) -> Uuid;
}

impl Ranked for UserRecord {
    fn rank_id(&self) -> Uuid {
        self.id
    }
}

impl Ranked for TeamRecord {
    fn rank_id(&self) -> Uuid {
        self.id
    }
}

/// A kind of rankable item and the queries that load it.
pub trait RankedSource: Sync {
    type Item: Ranked + Send;

    fn item_type(&self) -> ItemType;

    fn ranks(
        &self,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<Vec<DisplayOrderItem>, sqlx::Error>> + Send;

    fn fetch_by_ids(
        &self,
        ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<Self::Item>, sqlx::Error>> + Send;

    fn fetch_unordered(
        &self,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<Vec<Self::Item>, sqlx::Error>> + Send;
}

/// Loads the items of `source` in rank order. Never fails: every backend
/// error degrades to the fallback or to an empty list, and is logged.
pub async fn ranked_fetch<R: RankedSource>(
    source: &R,
    limit: Option<i64>,
    policy: FallbackPolicy,
) -> Vec<R::Item> {
    let item_type = source.item_type();

    let ids: Vec<Uuid> = match source.ranks(limit).await {
        Ok(rows) if rows.is_empty() => {
            log::warn!("No display order rows for {}, applying {:?} fallback", item_type, policy);
            return fallback(source, limit, policy).await;
        }
        Ok(rows) => rows.into_iter().map(|row| row.item_id).collect(),
        Err(e) => {
            log::warn!(
                "Display order query for {} failed ({}), applying {:?} fallback",
                item_type,
                e,
                policy
            );
            return fallback(source, limit, policy).await;
        }
    };

    match source.fetch_by_ids(&ids).await {
        Ok(items) => reorder_by_rank(&ids, items),
        Err(e) => {
            log::error!("Error fetching ranked {} rows: {}", item_type, e);
            Vec::new()
        }
    }
}

async fn fallback<R: RankedSource>(
    source: &R,
    limit: Option<i64>,
    policy: FallbackPolicy,
) -> Vec<R::Item> {
    match policy {
        FallbackPolicy::Empty => Vec::new(),
        FallbackPolicy::Unordered => match source.fetch_unordered(limit).await {
            Ok(items) => items,
            Err(e) => {
                log::error!("Error fetching unordered {} rows: {}", source.item_type(), e);
                Vec::new()
            }
        },
    }
}

/// Arranges `items` in the order of `ids`. Ids without a matching item are
/// skipped, as are items whose id is not ranked.
pub fn reorder_by_rank<T: Ranked>(ids: &[Uuid], items: Vec<T>) -> Vec<T> {
    let mut by_id: HashMap<Uuid, T> = items
        .into_iter()
        .map(|item| (item.rank_id(), item))
        .collect();

    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}
