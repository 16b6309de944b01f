//! Grouped views of an artist's or team's career entries.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::database::models::{CareerCategory, CareerEntry};
use crate::services::thumbnail::{Thumbnail, thumbnail_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileLimits {
    pub featured: usize,
    pub recent: usize,
}

impl Default for ProfileLimits {
    fn default() -> Self {
        Self {
            featured: 6,
            recent: 4,
        }
    }
}

/// How a category list reveals entries beyond what fits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Disclosure {
    /// Show the first `visible` entries and put the rest behind a toggle.
    #[serde(rename_all = "camelCase")]
    ShowMore { visible: usize },
    /// Show everything inside a height-capped scroll container.
    #[serde(rename_all = "camelCase")]
    Scroll { max_height_px: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosurePolicy {
    rules: BTreeMap<CareerCategory, Disclosure>,
    default: Disclosure,
}

impl Default for DisclosurePolicy {
    fn default() -> Self {
        let show_more = Disclosure::ShowMore { visible: 3 };
        let scroll = Disclosure::Scroll { max_height_px: 480 };

        let rules = BTreeMap::from([
            (CareerCategory::Choreography, show_more),
            (CareerCategory::Performance, show_more),
            (CareerCategory::Advertisement, scroll),
            (CareerCategory::Tv, scroll),
            (CareerCategory::Workshop, scroll),
        ]);

        Self {
            rules,
            default: show_more,
        }
    }
}

impl DisclosurePolicy {
    pub fn with_rule(mut self, category: CareerCategory, disclosure: Disclosure) -> Self {
        self.rules.insert(category, disclosure);
        self
    }

    pub fn for_category(&self, category: CareerCategory) -> Disclosure {
        self.rules.get(&category).copied().unwrap_or(self.default)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerCard {
    #[serde(flatten)]
    pub entry: CareerEntry,
    pub thumbnail: Thumbnail,
}

impl From<&CareerEntry> for CareerCard {
    fn from(entry: &CareerEntry) -> Self {
        Self {
            thumbnail: thumbnail_for(entry),
            entry: entry.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySection {
    pub category: CareerCategory,
    pub total: usize,
    pub disclosure: Disclosure,
    pub visible: Vec<CareerCard>,
    pub hidden: Vec<CareerCard>,
}

impl CategorySection {
    pub fn has_more(&self) -> bool {
        !self.hidden.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGroup {
    pub year: i32,
    pub entries: Vec<CareerCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub total: usize,
    pub featured: Vec<CareerCard>,
    pub recent: Vec<CareerCard>,
    pub categories: Vec<CategorySection>,
    pub years: Vec<YearGroup>,
}

pub fn featured(entries: &[CareerEntry], limit: usize) -> Vec<&CareerEntry> {
    entries.iter().filter(|e| e.is_featured).take(limit).collect()
}

pub fn recent(entries: &[CareerEntry], limit: usize) -> Vec<&CareerEntry> {
    entries.iter().take(limit).collect()
}

/// One bucket per category, in enum order. Entries with an unrecognized
/// category are left out.
pub fn partition_by_category(
    entries: &[CareerEntry],
) -> Vec<(CareerCategory, Vec<&CareerEntry>)> {
    let mut buckets: BTreeMap<CareerCategory, Vec<&CareerEntry>> = CareerCategory::ALL
        .iter()
        .map(|c| (*c, Vec::new()))
        .collect();

    for entry in entries {
        if let Some(bucket) = entry.category().and_then(|c| buckets.get_mut(&c)) {
            bucket.push(entry);
        }
    }

    buckets.into_iter().collect()
}

/// Entries keyed by event year, newest year first. Undated entries are left
/// out; input order is kept within a year.
pub fn group_by_year(entries: &[CareerEntry]) -> Vec<(i32, Vec<&CareerEntry>)> {
    let mut years: BTreeMap<i32, Vec<&CareerEntry>> = BTreeMap::new();

    for entry in entries {
        if let Some(year) = entry.year() {
            years.entry(year).or_default().push(entry);
        }
    }

    years.into_iter().rev().collect()
}

fn cards(entries: &[&CareerEntry]) -> Vec<CareerCard> {
    entries.iter().map(|e| CareerCard::from(*e)).collect()
}

fn section(
    category: CareerCategory,
    entries: &[&CareerEntry],
    disclosure: Disclosure,
) -> CategorySection {
    let split = match disclosure {
        Disclosure::ShowMore { visible } => visible.min(entries.len()),
        Disclosure::Scroll { .. } => entries.len(),
    };
    let (visible, hidden) = entries.split_at(split);

    CategorySection {
        category,
        total: entries.len(),
        disclosure,
        visible: cards(visible),
        hidden: cards(hidden),
    }
}

pub fn build_profile_view(
    entries: &[CareerEntry],
    limits: ProfileLimits,
    policy: &DisclosurePolicy,
) -> ProfileView {
    let categories = partition_by_category(entries)
        .into_iter()
        .map(|(category, bucket)| section(category, &bucket, policy.for_category(category)))
        .collect();

    let years = group_by_year(entries)
        .into_iter()
        .map(|(year, bucket)| YearGroup {
            year,
            entries: cards(&bucket),
        })
        .collect();

    ProfileView {
        total: entries.len(),
        featured: cards(&featured(entries, limits.featured)),
        recent: cards(&recent(entries, limits.recent)),
        categories,
        years,
    }
}
