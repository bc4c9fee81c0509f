use chrono::NaiveDate;

use crate::facets::Facet;
use crate::filters::{FilterState, Toggle};
use crate::models::Internship;

/// A test over one listing, derived from one active criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Flag(Toggle),
    MinStipend(u32),
    StartsOnOrAfter(NaiveDate),
    MaxDuration(u32),
    /// Case-insensitive substring of title, company and profile.
    Keyword(String),
    Profile(Vec<String>),
    Location(Vec<String>),
}

impl Predicate {
    /// Missing or unparsable fields never satisfy a threshold.
    pub fn matches(&self, job: &Internship) -> bool {
        match self {
            Predicate::Flag(toggle) => flag(job, *toggle),
            Predicate::MinStipend(min) => job
                .stipend
                .lower_bound()
                .is_some_and(|lower| lower >= f64::from(*min)),
            Predicate::StartsOnOrAfter(date) => {
                job.start_date_value().is_some_and(|start| start >= *date)
            }
            Predicate::MaxDuration(max) => job.duration_months().is_some_and(|m| m <= *max),
            Predicate::Keyword(needle) => job
                .search_text()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Predicate::Profile(wanted) => wanted.iter().any(|p| *p == job.profile_name),
            Predicate::Location(wanted) => job
                .location_names
                .iter()
                .any(|loc| wanted.iter().any(|w| w == loc)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Flag(toggle) => toggle.name(),
            Predicate::MinStipend(_) => "min-stipend",
            Predicate::StartsOnOrAfter(_) => "start-from",
            Predicate::MaxDuration(_) => "max-duration",
            Predicate::Keyword(_) => "keyword",
            Predicate::Profile(_) => "profile",
            Predicate::Location(_) => "location",
        }
    }
}

fn flag(job: &Internship, toggle: Toggle) -> bool {
    match toggle {
        Toggle::Remote => job.is_remote(),
        Toggle::PartTime => job.is_part_time(),
        Toggle::JobOffer => job.offers_job(),
        Toggle::FastResponse => job.responds_fast(),
        Toggle::EarlyApplicant => job.wants_early_applicants(),
        Toggle::ForWomen => job.is_for_women(),
    }
}

/// One predicate per active criterion, in a fixed order. Inactive criteria
/// produce nothing, so an all-default state compiles to an empty list.
pub fn compile(filters: &FilterState) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    for toggle in Toggle::ALL {
        if filters.toggle(toggle) {
            predicates.push(Predicate::Flag(toggle));
        }
    }

    if let Some(min) = filters.min_stipend() {
        predicates.push(Predicate::MinStipend(min));
    }
    if let Some(date) = filters.start_from() {
        predicates.push(Predicate::StartsOnOrAfter(date));
    }
    if let Some(months) = filters.max_duration() {
        predicates.push(Predicate::MaxDuration(months));
    }
    if !filters.keyword().is_empty() {
        predicates.push(Predicate::Keyword(filters.keyword().to_string()));
    }

    let profiles = filters.selected(Facet::Profiles);
    if !profiles.is_empty() {
        predicates.push(Predicate::Profile(profiles.to_vec()));
    }
    let locations = filters.selected(Facet::Locations);
    if !locations.is_empty() {
        predicates.push(Predicate::Location(locations.to_vec()));
    }

    predicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::Facets;
    use crate::filters::Threshold;

    fn job() -> Internship {
        let mut job = Internship::new(1, "Content Writing Intern", "Acme Media", "Content Writing");
        job.stipend.salary_value1 = Some(5000.0);
        job.location_names = vec!["Mumbai".to_string()];
        job.duration = "3 Months".to_string();
        job.start_date_comparison_format = Some("2024-06-10".to_string());
        job
    }

    #[test]
    fn test_compile_default_is_empty() {
        assert!(compile(&FilterState::default()).is_empty());
    }

    #[test]
    fn test_compile_only_active_criteria() {
        let state = FilterState::default()
            .with_toggle(Toggle::PartTime, true)
            .with_threshold(Threshold::MaxDuration(Some(3)))
            .with_keyword("acme");
        let names: Vec<_> = compile(&state).iter().map(Predicate::name).collect();
        assert_eq!(names, vec!["part-time", "max-duration", "keyword"]);
    }

    #[test]
    fn test_min_stipend_is_inclusive_on_lower_bound() {
        let job = job();
        assert!(Predicate::MinStipend(5000).matches(&job));
        assert!(!Predicate::MinStipend(6000).matches(&job));

        let mut unpaid = job.clone();
        unpaid.stipend.salary_value1 = None;
        unpaid.stipend.salary_value2 = Some(9000.0);
        assert!(!Predicate::MinStipend(1000).matches(&unpaid));
    }

    #[test]
    fn test_duration_and_start_date() {
        let job = job();
        assert!(Predicate::MaxDuration(3).matches(&job));
        assert!(!Predicate::MaxDuration(2).matches(&job));

        let june_1 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let july_1 = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert!(Predicate::StartsOnOrAfter(june_1).matches(&job));
        assert!(!Predicate::StartsOnOrAfter(july_1).matches(&job));

        let mut vague = job.clone();
        vague.duration = "Flexible".to_string();
        vague.start_date_comparison_format = None;
        vague.start_date = "Immediately".to_string();
        assert!(!Predicate::MaxDuration(12).matches(&vague));
        assert!(!Predicate::StartsOnOrAfter(june_1).matches(&vague));
    }

    #[test]
    fn test_keyword_spans_title_company_profile() {
        let job = job();
        for needle in ["writing intern", "acme media", "content writing", "intern acme"] {
            assert!(Predicate::Keyword(needle.to_string()).matches(&job), "{needle}");
        }
        assert!(!Predicate::Keyword("mumbai".to_string()).matches(&job));
    }

    #[test]
    fn test_keyword_needle_case_is_ignored() {
        let job = job();
        assert!(Predicate::Keyword("Content WRITING".to_string()).matches(&job));
        assert!(Predicate::Keyword("ACME".to_string()).matches(&job));
    }

    #[test]
    fn test_multi_select_is_exact() {
        let job = job();
        assert!(Predicate::Location(vec!["Pune".into(), "Mumbai".into()]).matches(&job));
        assert!(!Predicate::Location(vec!["mumbai".into()]).matches(&job));
        assert!(Predicate::Profile(vec!["Content Writing".into()]).matches(&job));
        assert!(!Predicate::Profile(vec!["content writing".into()]).matches(&job));
    }

    #[test]
    fn test_compile_tags() {
        let facets = Facets::extract(&[job()]);
        let state = FilterState::default()
            .with_tag(Facet::Locations, "mumbai", &facets)
            .unwrap();
        assert_eq!(compile(&state), vec![Predicate::Location(vec!["Mumbai".into()])]);
    }

    #[test]
    fn test_flags() {
        let mut job = job();
        assert!(!Predicate::Flag(Toggle::Remote).matches(&job));
        job.work_from_home = true;
        job.is_ppo = true;
        assert!(Predicate::Flag(Toggle::Remote).matches(&job));
        assert!(Predicate::Flag(Toggle::JobOffer).matches(&job));
        assert!(!Predicate::Flag(Toggle::PartTime).matches(&job));
    }
}
