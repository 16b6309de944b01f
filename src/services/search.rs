//! In-memory filtering and sorting of the directory lists.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::services::mappers::{Dancer, Team};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Popularity,
    Newest,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Solo,
    Team,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default)]
    pub query: String,
    pub specialty: Option<String>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default, rename = "type")]
    pub type_filter: TypeFilter,
}

/// A change to exactly one filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPatch {
    Query(String),
    Specialty(Option<String>),
    SortBy(SortBy),
    Type(TypeFilter),
}

impl SearchFilters {
    pub fn apply(&mut self, patch: FilterPatch) {
        match patch {
            FilterPatch::Query(query) => self.query = query,
            FilterPatch::Specialty(specialty) => self.specialty = specialty,
            FilterPatch::SortBy(sort_by) => self.sort_by = sort_by,
            FilterPatch::Type(type_filter) => self.type_filter = type_filter,
        }
    }
}

/// Source lists plus filters, with the filtered results kept up to date.
///
/// Results are recomputed whenever the filters change, so reads
/// are free.
#[derive(Debug, Clone)]
pub struct SearchState {
    dancers: Vec<Dancer>,
    teams: Vec<Team>,
    filters: SearchFilters,
    filtered_dancers: Vec<Dancer>,
    filtered_teams: Vec<Team>,
}

impl SearchState {
    pub fn new(dancers: Vec<Dancer>, teams: Vec<Team>) -> Self {
        Self::with_filters(dancers, teams, SearchFilters::default())
    }

    pub fn with_filters(dancers: Vec<Dancer>, teams: Vec<Team>, filters: SearchFilters) -> Self {
        let mut state = Self {
            dancers,
            teams,
            filters,
            filtered_dancers: Vec::new(),
            filtered_teams: Vec::new(),
        };
        state.recompute();
        state
    }

    pub fn update_filter(&mut self, patch: FilterPatch) {
        let mut next = self.filters.clone();
        next.apply(patch);
        if next != self.filters {
            self.filters = next;
            self.recompute();
        }
    }

    pub fn clear_search(&mut self) {
        if self.filters != SearchFilters::default() {
            self.filters = SearchFilters::default();
            self.recompute();
        }
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn filtered_dancers(&self) -> &[Dancer] {
        &self.filtered_dancers
    }

    pub fn filtered_teams(&self) -> &[Team] {
        &self.filtered_teams
    }

    pub fn total_results(&self) -> usize {
        self.filtered_dancers.len() + self.filtered_teams.len()
    }

    pub fn into_results(self) -> (Vec<Dancer>, Vec<Team>, SearchFilters) {
        (self.filtered_dancers, self.filtered_teams, self.filters)
    }

    fn recompute(&mut self) {
        self.filtered_dancers = filter_dancers(&self.dancers, &self.filters);
        self.filtered_teams = filter_teams(&self.teams, &self.filters);
    }
}

fn matches_query(query: &str, fields: [&str; 2]) -> bool {
    if query.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(query))
}

/// Ordering key approximating locale-aware collation: case-folded first,
/// exact text as a tiebreak. Hangul syllables are already in dictionary
/// order by code point.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn filter_dancers(dancers: &[Dancer], filters: &SearchFilters) -> Vec<Dancer> {
    if filters.type_filter == TypeFilter::Team {
        return Vec::new();
    }

    let query = filters.query.to_lowercase();
    let specialty = filters
        .specialty
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut result: Vec<Dancer> = dancers
        .iter()
        .filter(|d| matches_query(&query, [d.name.as_str(), d.name_en.as_str()]))
        .filter(|d| {
            specialty
                .as_ref()
                .is_none_or(|s| d.specialty.value.to_lowercase() == *s)
        })
        .cloned()
        .collect();

    match filters.sort_by {
        SortBy::Name => result.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortBy::Popularity => result.sort_by(|a, b| {
            b.monthly_listeners
                .unwrap_or(0)
                .cmp(&a.monthly_listeners.unwrap_or(0))
        }),
        // Ids sort as their hyphenated string form.
        SortBy::Newest => result.sort_by(|a, b| b.id.cmp(&a.id)),
    }

    result
}

pub fn filter_teams(teams: &[Team], filters: &SearchFilters) -> Vec<Team> {
    if filters.type_filter == TypeFilter::Solo {
        return Vec::new();
    }

    let query = filters.query.to_lowercase();

    let mut result: Vec<Team> = teams
        .iter()
        .filter(|t| matches_query(&query, [t.name.as_str(), t.name_ko.as_str()]))
        .cloned()
        .collect();

    match filters.sort_by {
        SortBy::Name => result.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortBy::Popularity => {
            let followers = |t: &Team| t.followers.as_ref().map_or(0, |f| f.value);
            result.sort_by(|a, b| followers(b).cmp(&followers(a)))
        }
        SortBy::Newest => {
            let year = |t: &Team| t.formed_year.as_ref().map_or(0, |y| y.value);
            result.sort_by(|a, b| year(b).cmp(&year(a)))
        }
    }

    result
}
