use chrono::NaiveDate;

use crate::facets::{Facet, Facets};

/// Lowest stipend slider position. Means "no stipend filter".
pub const STIPEND_NO_FILTER: u32 = 0;
pub const STIPEND_SLIDER_MAX: u32 = 10_000;
pub const STIPEND_SLIDER_STEP: u32 = 1_000;

/// Whether `value` is a position the stipend slider can produce. Other values
/// are still valid thresholds.
pub fn on_stipend_slider(value: u32) -> bool {
    value <= STIPEND_SLIDER_MAX && value % STIPEND_SLIDER_STEP == 0
}

/// On/off criteria. Off means every listing passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Remote,
    PartTime,
    JobOffer,
    FastResponse,
    EarlyApplicant,
    ForWomen,
}

impl Toggle {
    pub const ALL: [Toggle; 6] = [
        Toggle::Remote,
        Toggle::PartTime,
        Toggle::JobOffer,
        Toggle::FastResponse,
        Toggle::EarlyApplicant,
        Toggle::ForWomen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Toggle::Remote => "remote",
            Toggle::PartTime => "part-time",
            Toggle::JobOffer => "job-offer",
            Toggle::FastResponse => "fast-response",
            Toggle::EarlyApplicant => "early-applicant",
            Toggle::ForWomen => "for-women",
        }
    }
}

/// A new value for one of the threshold criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    /// Inclusive minimum against the stipend's lower bound.
    /// `STIPEND_NO_FILTER` deactivates it.
    MinStipend(u32),
    /// Earliest acceptable start date. `None` deactivates it.
    StartFrom(Option<NaiveDate>),
    /// Longest acceptable duration in months. `None` deactivates it.
    MaxDuration(Option<u32>),
}

impl Threshold {
    /// From a date input's text (`YYYY-MM-DD`). Empty or invalid text clears the criterion.
    pub fn start_from_text(text: &str) -> Self {
        let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok();
        Threshold::StartFrom(date)
    }

    /// From a number input's text. Empty or non-numeric text clears the criterion.
    pub fn max_duration_text(text: &str) -> Self {
        Threshold::MaxDuration(text.trim().parse().ok())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Toggles {
    remote: bool,
    part_time: bool,
    job_offer: bool,
    fast_response: bool,
    early_applicant: bool,
    for_women: bool,
}

impl Toggles {
    fn slot(&mut self, toggle: Toggle) -> &mut bool {
        match toggle {
            Toggle::Remote => &mut self.remote,
            Toggle::PartTime => &mut self.part_time,
            Toggle::JobOffer => &mut self.job_offer,
            Toggle::FastResponse => &mut self.fast_response,
            Toggle::EarlyApplicant => &mut self.early_applicant,
            Toggle::ForWomen => &mut self.for_women,
        }
    }

    fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Remote => self.remote,
            Toggle::PartTime => self.part_time,
            Toggle::JobOffer => self.job_offer,
            Toggle::FastResponse => self.fast_response,
            Toggle::EarlyApplicant => self.early_applicant,
            Toggle::ForWomen => self.for_women,
        }
    }
}

/// The user's current filter selections.
///
/// A plain value: every edit consumes the old state and hands back a new
/// one, and each edit touches exactly one criterion. `FilterState::default()`
/// is the all-inactive state that "clear all" returns to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    toggles: Toggles,
    min_stipend: u32,
    start_from: Option<NaiveDate>,
    max_duration: Option<u32>,
    keyword: String,
    profiles: Vec<String>,
    locations: Vec<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            toggles: Toggles::default(),
            min_stipend: STIPEND_NO_FILTER,
            start_from: None,
            max_duration: None,
            keyword: String::new(),
            profiles: Vec::new(),
            locations: Vec::new(),
        }
    }
}

impl FilterState {
    // --- Reads ---

    pub fn toggle(&self, toggle: Toggle) -> bool {
        self.toggles.get(toggle)
    }

    pub fn min_stipend(&self) -> Option<u32> {
        (self.min_stipend != STIPEND_NO_FILTER).then_some(self.min_stipend)
    }

    pub fn start_from(&self) -> Option<NaiveDate> {
        self.start_from
    }

    pub fn max_duration(&self) -> Option<u32> {
        self.max_duration
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn selected(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Profiles => &self.profiles,
            Facet::Locations => &self.locations,
        }
    }

    pub fn is_cleared(&self) -> bool {
        *self == FilterState::default()
    }

    // --- Edits ---

    pub fn with_toggle(mut self, toggle: Toggle, on: bool) -> Self {
        *self.toggles.slot(toggle) = on;
        self
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        match threshold {
            Threshold::MinStipend(value) => self.min_stipend = value,
            Threshold::StartFrom(date) => self.start_from = date,
            Threshold::MaxDuration(months) => self.max_duration = months,
        }
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// Add `candidate` to a multi-select criterion if `facets` offers it.
    ///
    /// Returns `None` when the candidate is not a known facet value or is
    /// already selected (both compared case-insensitively). The stored value
    /// is the facet's own spelling.
    pub fn with_tag(mut self, facet: Facet, candidate: &str, facets: &Facets) -> Option<Self> {
        let value = facets.accept(facet, self.selected(facet), candidate)?.to_string();
        self.selected_mut(facet).push(value);
        Some(self)
    }

    /// Remove the selection at `index`. Out-of-range indexes leave the state as is.
    pub fn without_tag(mut self, facet: Facet, index: usize) -> Self {
        let selected = self.selected_mut(facet);
        if index < selected.len() {
            selected.remove(index);
        }
        self
    }

    fn selected_mut(&mut self, facet: Facet) -> &mut Vec<String> {
        match facet {
            Facet::Profiles => &mut self.profiles,
            Facet::Locations => &mut self.locations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Internship;

    fn facets() -> Facets {
        let mut a = Internship::new(1, "A", "X", "SEO");
        a.location_names = vec!["Mumbai".to_string()];
        let mut b = Internship::new(2, "B", "Y", "Design");
        b.location_names = vec!["Delhi".to_string()];
        Facets::extract(&[a, b])
    }

    #[test]
    fn test_default_is_cleared() {
        let state = FilterState::default();
        assert!(state.is_cleared());
        assert_eq!(state.min_stipend(), None);
        assert!(Toggle::ALL.iter().all(|t| !state.toggle(*t)));
    }

    #[test]
    fn test_edits_touch_one_criterion() {
        let state = FilterState::default()
            .with_toggle(Toggle::Remote, true)
            .with_keyword("design");
        let next = state.clone().with_threshold(Threshold::MinStipend(6000));

        assert!(next.toggle(Toggle::Remote));
        assert_eq!(next.keyword(), "design");
        assert_eq!(next.min_stipend(), Some(6000));
        assert_eq!(state.min_stipend(), None);
    }

    #[test]
    fn test_stipend_sentinel_is_inactive() {
        let state = FilterState::default()
            .with_threshold(Threshold::MinStipend(4000))
            .with_threshold(Threshold::MinStipend(STIPEND_NO_FILTER));
        assert_eq!(state.min_stipend(), None);
        assert!(state.is_cleared());
    }

    #[test]
    fn test_stipend_slider_positions() {
        assert!(on_stipend_slider(STIPEND_NO_FILTER));
        assert!(on_stipend_slider(6000));
        assert!(on_stipend_slider(STIPEND_SLIDER_MAX));
        assert!(!on_stipend_slider(2500));
        assert!(!on_stipend_slider(STIPEND_SLIDER_MAX + STIPEND_SLIDER_STEP));

        let state = FilterState::default().with_threshold(Threshold::MinStipend(2500));
        assert_eq!(state.min_stipend(), Some(2500));
    }

    #[test]
    fn test_threshold_text_inputs() {
        assert_eq!(Threshold::max_duration_text("3"), Threshold::MaxDuration(Some(3)));
        assert_eq!(Threshold::max_duration_text(""), Threshold::MaxDuration(None));
        assert_eq!(Threshold::max_duration_text("three"), Threshold::MaxDuration(None));
        assert_eq!(
            Threshold::start_from_text("2024-06-01"),
            Threshold::StartFrom(NaiveDate::from_ymd_opt(2024, 6, 1))
        );
        assert_eq!(Threshold::start_from_text(""), Threshold::StartFrom(None));
    }

    #[test]
    fn test_with_tag_uses_facet_spelling() {
        let facets = facets();
        let state = FilterState::default()
            .with_tag(Facet::Locations, "mumbai", &facets)
            .unwrap();
        assert_eq!(state.selected(Facet::Locations), ["Mumbai"]);
    }

    #[test]
    fn test_with_tag_rejects_unknown_and_duplicates() {
        let facets = facets();
        let state = FilterState::default()
            .with_tag(Facet::Profiles, "SEO", &facets)
            .unwrap();

        assert!(state.clone().with_tag(Facet::Profiles, "seo", &facets).is_none());
        assert!(state.clone().with_tag(Facet::Profiles, "Nonexistent", &facets).is_none());
        assert!(state.clone().with_tag(Facet::Locations, "SEO", &facets).is_none());
    }

    #[test]
    fn test_without_tag() {
        let facets = facets();
        let state = FilterState::default()
            .with_tag(Facet::Profiles, "SEO", &facets)
            .and_then(|s| s.with_tag(Facet::Profiles, "Design", &facets))
            .unwrap();

        let state = state.without_tag(Facet::Profiles, 5);
        assert_eq!(state.selected(Facet::Profiles).len(), 2);

        let state = state.without_tag(Facet::Profiles, 0);
        assert_eq!(state.selected(Facet::Profiles), ["Design"]);
    }
}
