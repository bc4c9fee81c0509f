use crate::models::Internship;
use crate::predicate::Predicate;

/// Keep the listings that satisfy every predicate, in their original order.
///
/// An empty predicate list keeps everything. The input is only read.
pub fn apply<'a>(records: &'a [Internship], predicates: &[Predicate]) -> Vec<&'a Internship> {
    records
        .iter()
        .filter(|record| passes(record, predicates))
        .collect()
}

/// Same as [`apply`], but yields positions into `records`.
pub fn apply_indices(records: &[Internship], predicates: &[Predicate]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| passes(record, predicates))
        .map(|(i, _)| i)
        .collect()
}

fn passes(record: &Internship, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|p| p.matches(record))
}
