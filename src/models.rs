use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

use crate::error::CatalogError;

/// Display-only pseudo-location for remote listings. Never a facet value.
pub const WORK_FROM_HOME: &str = "Work From Home";

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d+)\s*(months?|weeks?)?\s*$").unwrap());

const FAST_RESPONSE_LABELS: [&str; 2] = ["actively hiring", "fast response"];
const EARLY_APPLICANT_LABEL: &str = "early applicant";
const FOR_WOMEN_MARKER: &str = "women";

// Upstream feeds send `null` for fields that are usually present.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Stipend {
    #[serde(default, deserialize_with = "nullable")]
    pub salary: String, // display string, e.g. "₹ 5,000 /month"
    #[serde(rename = "salaryValue1", default)]
    pub salary_value1: Option<f64>,
    #[serde(rename = "salaryValue2", default)]
    pub salary_value2: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub currency: String,
    #[serde(rename = "salaryType", default, deserialize_with = "nullable")]
    pub salary_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub scale: String,
}

impl Stipend {
    /// Swap the bounds if the feed delivered them out of order.
    pub fn normalize(&mut self) {
        if let (Some(min), Some(max)) = (self.salary_value1, self.salary_value2) {
            if min > max {
                self.salary_value1 = Some(max);
                self.salary_value2 = Some(min);
            }
        }
    }

    pub fn lower_bound(&self) -> Option<f64> {
        self.salary_value1
    }
}

/// One internship posting, as delivered by the listing feed.
///
/// `id`, `title`, `company_name` and `profile_name` are required; a record
/// without them is rejected at load time. Everything else falls back to an
/// empty default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Internship {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    pub profile_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub stipend: Stipend,
    #[serde(default, deserialize_with = "nullable")]
    pub location_names: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub work_from_home: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub part_time: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub is_ppo: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(default)]
    pub start_date_comparison_format: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: String,
    #[serde(default, deserialize_with = "nullable")]
    pub segment: String,
    #[serde(default, deserialize_with = "nullable")]
    pub job_segments: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub labels_app_in_card: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub posted_on: String,
    #[serde(rename = "postedOnDateTime", default)]
    pub posted_on_timestamp: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub expiring_in: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<String>,
}

impl Internship {
    /// A minimal record; the remaining fields take their feed defaults.
    pub fn new(id: i64, title: &str, company_name: &str, profile_name: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            company_name: company_name.to_string(),
            profile_name: profile_name.to_string(),
            stipend: Stipend::default(),
            location_names: Vec::new(),
            work_from_home: false,
            part_time: false,
            is_ppo: false,
            start_date: String::new(),
            start_date_comparison_format: None,
            duration: String::new(),
            segment: String::new(),
            job_segments: Vec::new(),
            labels_app_in_card: Vec::new(),
            posted_on: String::new(),
            posted_on_timestamp: None,
            url: None,
            expiring_in: None,
            application_deadline: None,
        }
    }

    /// Title, company and profile joined by single spaces. Keyword search
    /// runs over this text.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.company_name, self.profile_name)
    }

    pub fn start_date_value(&self) -> Option<NaiveDate> {
        self.start_date_comparison_format
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
            .or_else(|| parse_card_date(&self.start_date))
    }

    /// Duration in whole months. Weeks round up to the next month.
    pub fn duration_months(&self) -> Option<u32> {
        parse_duration_months(&self.duration)
    }

    pub fn is_remote(&self) -> bool {
        self.work_from_home
    }

    pub fn is_part_time(&self) -> bool {
        self.part_time
    }

    pub fn offers_job(&self) -> bool {
        self.is_ppo
    }

    pub fn responds_fast(&self) -> bool {
        self.labels_app_in_card.iter().any(|label| {
            let lower = label.to_lowercase();
            FAST_RESPONSE_LABELS.iter().any(|l| lower.contains(l))
        })
    }

    pub fn wants_early_applicants(&self) -> bool {
        self.labels_app_in_card
            .iter()
            .any(|label| label.to_lowercase().contains(EARLY_APPLICANT_LABEL))
    }

    pub fn is_for_women(&self) -> bool {
        std::iter::once(&self.segment)
            .chain(self.job_segments.iter())
            .chain(self.labels_app_in_card.iter())
            .any(|s| s.to_lowercase().contains(FOR_WOMEN_MARKER))
    }

    /// Locations for display: the listed names plus the WFH marker when the
    /// posting is remote, without duplicating it.
    pub fn displayed_locations(&self) -> Vec<String> {
        let mut locations = self.location_names.clone();
        if self.work_from_home && !locations.iter().any(|l| l == WORK_FROM_HOME) {
            locations.push(WORK_FROM_HOME.to_string());
        }
        locations
    }

    pub fn displayed_stipend(&self) -> String {
        match (self.stipend.salary_value1, self.stipend.salary_value2) {
            (Some(min), Some(max)) if min != 0.0 && max != 0.0 => {
                format!("₹{} - ₹{}", min, max)
            }
            _ => self.stipend.salary.clone(),
        }
    }

    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.posted_on_timestamp
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    /// Human-readable age of the posting relative to `today`.
    pub fn posted_relative(&self, today: NaiveDate) -> String {
        let posted = parse_card_date(&self.posted_on)
            .or_else(|| self.posted_at().map(|dt| dt.date_naive()));

        let Some(posted) = posted else {
            return "Unknown date".to_string();
        };

        let days = (today - posted).num_days();
        if days <= 0 {
            "Today".to_string()
        } else if days < 30 {
            plural(days, "day")
        } else if days < 365 {
            plural(days / 30, "month")
        } else {
            plural(days / 365, "year")
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Parse the feed's card date format, e.g. `10 Jun' 24`.
pub fn parse_card_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, "%d %b' %y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .ok()
}

pub fn parse_duration_months(text: &str) -> Option<u32> {
    let caps = DURATION_RE.captures(text)?;
    let count: u32 = caps.get(1)?.as_str().parse().ok()?;
    let in_weeks = caps
        .get(2)
        .map(|unit| unit.as_str().to_lowercase().starts_with("week"))
        .unwrap_or(false);

    if in_weeks {
        Some(count.div_ceil(4))
    } else {
        Some(count)
    }
}

/// The listing feed payload: records keyed by id plus the display order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    pub internship_ids: Vec<i64>,
    pub internships_meta: HashMap<String, Internship>,
}

impl Snapshot {
    /// Resolve `internship_ids` into records, in order.
    pub fn into_records(self) -> Result<Vec<Internship>, CatalogError> {
        self.internship_ids
            .iter()
            .map(|id| {
                let mut record = self
                    .internships_meta
                    .get(&id.to_string())
                    .cloned()
                    .ok_or(CatalogError::MissingRecord(*id))?;
                record.stipend.normalize();
                Ok(record)
            })
            .collect()
    }
}
