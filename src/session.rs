use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine;
use crate::error::CatalogError;
use crate::facets::{Facet, Facets};
use crate::filters::{FilterState, Threshold, Toggle};
use crate::models::Internship;
use crate::predicate;

/// Where the raw collection stands. The session does not interpret this;
/// it only lets the view tell "loading" apart from "failed" and "empty".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

struct ViewCache {
    filters: Arc<FilterState>,
    records: Arc<[Internship]>,
    visible: Vec<usize>,
}

/// One browsing session: the raw collection, the current filter snapshot,
/// the facets derived from the collection, and the filtered view.
///
/// The view is cached under the identity of the filter snapshot and the
/// collection. Any edit installs a new snapshot, so it always recomputes,
/// even when the new snapshot equals the old one by value.
pub struct Session {
    records: Arc<[Internship]>,
    load_state: LoadState,
    filters: Arc<FilterState>,
    facets: Facets,
    view: Option<ViewCache>,
    recomputations: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let mut session = Self {
            records: Arc::from(Vec::new()),
            load_state: LoadState::Loading,
            filters: Arc::new(FilterState::default()),
            facets: Facets::default(),
            view: None,
            recomputations: 0,
        };
        session.refresh();
        session
    }

    pub fn with_records(records: Vec<Internship>) -> Self {
        let mut session = Self::new();
        session.set_collection(records);
        session
    }

    // --- Inbound data ---

    /// Install a new raw collection. Facets are re-extracted from scratch.
    pub fn set_collection(&mut self, records: Vec<Internship>) {
        self.records = Arc::from(records);
        self.facets = Facets::extract(&self.records);
        self.load_state = LoadState::Ready;
        debug!(
            records = self.records.len(),
            profiles = self.facets.profiles.len(),
            locations = self.facets.locations.len(),
            "collection replaced"
        );
        self.refresh();
    }

    /// Install the outcome of a fetch. A failure leaves an empty collection
    /// and a `Failed` load state; it is not propagated.
    pub fn set_fetch_result(&mut self, result: Result<Vec<Internship>, CatalogError>) {
        match result {
            Ok(records) => self.set_collection(records),
            Err(err) => {
                warn!(error = %err, "listing fetch failed");
                self.set_collection(Vec::new());
                self.load_state = LoadState::Failed(err.to_string());
            }
        }
    }

    // --- Outbound reads ---

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn raw_records(&self) -> &[Internship] {
        &self.records
    }

    pub fn visible_records(&self) -> Vec<&Internship> {
        match &self.view {
            Some(view) => view.visible.iter().map(|&i| &view.records[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn filter_state(&self) -> Arc<FilterState> {
        Arc::clone(&self.filters)
    }

    /// How many times the filtered view has been rebuilt.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    // --- Edits ---

    pub fn set_toggle(&mut self, toggle: Toggle, on: bool) -> Arc<FilterState> {
        let next = self.current().with_toggle(toggle, on);
        self.install(next)
    }

    pub fn set_threshold(&mut self, threshold: Threshold) -> Arc<FilterState> {
        let next = self.current().with_threshold(threshold);
        self.install(next)
    }

    pub fn set_keyword(&mut self, keyword: &str) -> Arc<FilterState> {
        let next = self.current().with_keyword(keyword);
        self.install(next)
    }

    /// Add a multi-select value. Values the current facets do not offer, and
    /// values already selected, are ignored and the snapshot is kept as is.
    pub fn add_tag(&mut self, facet: Facet, value: &str) -> Arc<FilterState> {
        match self.current().with_tag(facet, value, &self.facets) {
            Some(next) => self.install(next),
            None => {
                debug!(facet = facet.name(), value, "tag rejected");
                self.filter_state()
            }
        }
    }

    pub fn remove_tag(&mut self, facet: Facet, index: usize) -> Arc<FilterState> {
        let next = self.current().without_tag(facet, index);
        self.install(next)
    }

    pub fn clear_all(&mut self) -> Arc<FilterState> {
        self.install(FilterState::default())
    }

    /// Install a caller-built snapshot wholesale.
    pub fn replace_filters(&mut self, filters: FilterState) -> Arc<FilterState> {
        self.install(filters)
    }

    fn current(&self) -> FilterState {
        FilterState::clone(&self.filters)
    }

    fn install(&mut self, next: FilterState) -> Arc<FilterState> {
        self.filters = Arc::new(next);
        self.refresh();
        self.filter_state()
    }

    fn refresh(&mut self) {
        if let Some(view) = &self.view {
            if Arc::ptr_eq(&view.filters, &self.filters) && Arc::ptr_eq(&view.records, &self.records) {
                return;
            }
        }

        let predicates = predicate::compile(&self.filters);
        let visible = engine::apply_indices(&self.records, &predicates);
        debug!(
            predicates = predicates.len(),
            records = self.records.len(),
            visible = visible.len(),
            "view recomputed"
        );

        self.view = Some(ViewCache {
            filters: Arc::clone(&self.filters),
            records: Arc::clone(&self.records),
            visible,
        });
        self.recomputations += 1;
    }
}
