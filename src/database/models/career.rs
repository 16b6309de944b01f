use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CareerCategory {
    Choreography,
    Performance,
    Advertisement,
    Tv,
    Workshop,
}

impl CareerCategory {
    pub const ALL: [CareerCategory; 5] = [
        CareerCategory::Choreography,
        CareerCategory::Performance,
        CareerCategory::Advertisement,
        CareerCategory::Tv,
        CareerCategory::Workshop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CareerCategory::Choreography => "choreography",
            CareerCategory::Performance => "performance",
            CareerCategory::Advertisement => "advertisement",
            CareerCategory::Tv => "tv",
            CareerCategory::Workshop => "workshop",
        }
    }
}

impl std::fmt::Display for CareerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CareerCategory {
    type Err = CareerInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "choreography" => Ok(CareerCategory::Choreography),
            "performance" => Ok(CareerCategory::Performance),
            "advertisement" => Ok(CareerCategory::Advertisement),
            "tv" => Ok(CareerCategory::Tv),
            "workshop" => Ok(CareerCategory::Workshop),
            _ => Err(CareerInputError::UnknownCategory(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateType {
    Single,
    Range,
}

impl DateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateType::Single => "single",
            DateType::Range => "range",
        }
    }
}

impl std::str::FromStr for DateType {
    type Err = CareerInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(DateType::Single),
            "range" => Ok(DateType::Range),
            _ => Err(CareerInputError::UnknownDateType(s.to_string())),
        }
    }
}

/// The date descriptor of a career entry, one of the two shapes selected by
/// `date_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dateType", rename_all = "lowercase")]
pub enum CareerDate {
    Single {
        date: NaiveDate,
    },
    Range {
        start: NaiveDate,
        end: Option<NaiveDate>,
    },
}

impl CareerDate {
    pub fn date_type(&self) -> DateType {
        match self {
            CareerDate::Single { .. } => DateType::Single,
            CareerDate::Range { .. } => DateType::Range,
        }
    }

    /// Column values as `(single_date, start_date, end_date)`.
    pub fn columns(&self) -> (Option<NaiveDate>, Option<NaiveDate>, Option<NaiveDate>) {
        match *self {
            CareerDate::Single { date } => (Some(date), None, None),
            CareerDate::Range { start, end } => (None, Some(start), end),
        }
    }
}

/// A row of the `career_entries` table.
///
/// `category` and `date_type` are kept as stored. Rows written outside this
/// service are not guaranteed to hold one of the known values.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareerEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub poster_url: Option<String>,
    pub is_featured: bool,
    pub country: Option<String>,
    pub date_type: String,
    pub single_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl CareerEntry {
    pub fn category(&self) -> Option<CareerCategory> {
        self.category.parse().ok()
    }

    /// Year used for chronological grouping: `single_date` first, then
    /// `start_date`, regardless of `date_type`.
    pub fn year(&self) -> Option<i32> {
        self.single_date.or(self.start_date).map(|d| d.year())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CareerInputError {
    #[error("Unknown career category: {0}")]
    UnknownCategory(String),

    #[error("Unknown date type: {0}")]
    UnknownDateType(String),

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("A single-date entry needs singleDate and no start/end dates")]
    InvalidSingleDate,

    #[error("A range entry needs startDate and no singleDate")]
    InvalidRange,

    #[error("endDate must not be before startDate")]
    EndBeforeStart,
}

/// Request body for creating a career entry from the self-service page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerEntryInput {
    pub category: String,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub poster_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub country: Option<String>,
    pub date_type: String,
    pub single_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A validated career entry, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCareerEntry {
    pub category: CareerCategory,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub poster_url: Option<String>,
    pub is_featured: bool,
    pub country: Option<String>,
    pub date: CareerDate,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CareerEntryInput {
    pub fn validate(self) -> Result<NewCareerEntry, CareerInputError> {
        let category: CareerCategory = self.category.parse()?;
        let date_type: DateType = self.date_type.parse()?;

        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(CareerInputError::EmptyTitle);
        }

        let date = match date_type {
            DateType::Single => match (self.single_date, self.start_date, self.end_date) {
                (Some(date), None, None) => CareerDate::Single { date },
                _ => return Err(CareerInputError::InvalidSingleDate),
            },
            DateType::Range => match (self.single_date, self.start_date) {
                (None, Some(start)) => {
                    if self.end_date.is_some_and(|end| end < start) {
                        return Err(CareerInputError::EndBeforeStart);
                    }
                    CareerDate::Range {
                        start,
                        end: self.end_date,
                    }
                }
                _ => return Err(CareerInputError::InvalidRange),
            },
        };

        Ok(NewCareerEntry {
            category,
            title,
            description: non_blank(self.description),
            video_url: non_blank(self.video_url),
            poster_url: non_blank(self.poster_url),
            is_featured: self.is_featured,
            country: non_blank(self.country),
            date,
        })
    }
}
