//! # internfilter
//!
//! Filter and facet engine for internship listings.
//!
//! A raw collection comes in from a [`Provider`]. [`Facets`] lists the
//! profile and location choices found in it, a [`FilterState`] holds the
//! user's selections, [`predicate::compile`] turns the active selections into
//! [`Predicate`]s and [`engine::apply`] keeps the listings that pass all of
//! them. [`Session`] ties these together and caches the filtered view.
//!
//! ```rust
//! use internfilter::{Internship, Session, Threshold};
//!
//! let mut cheap = Internship::new(1, "SEO Intern", "Acme", "SEO");
//! cheap.stipend.salary_value1 = Some(5000.0);
//! let mut paid = Internship::new(2, "Design Intern", "Studio", "Design");
//! paid.stipend.salary_value1 = Some(8000.0);
//!
//! let mut session = Session::with_records(vec![cheap, paid]);
//! session.set_threshold(Threshold::MinStipend(6000));
//!
//! let visible: Vec<i64> = session.visible_records().iter().map(|r| r.id).collect();
//! assert_eq!(visible, vec![2]);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod predicate;
pub mod provider;

mod error;
mod facets;
mod filters;
mod models;
mod session;

pub use config::Config;
pub use error::CatalogError;
pub use facets::{Facet, Facets};
pub use filters::{
    FilterState, STIPEND_NO_FILTER, STIPEND_SLIDER_MAX, STIPEND_SLIDER_STEP, Threshold, Toggle,
    on_stipend_slider,
};
pub use models::{Internship, Snapshot, Stipend, WORK_FROM_HOME, parse_card_date, parse_duration_months};
pub use predicate::Predicate;
pub use provider::{InMemory, Provider, SnapshotFile, WithFallback};
pub use session::{LoadState, Session};
