use crate::domain::model::{ConsultMode, Doctor, FilterSpec, SortKey};
use std::collections::BTreeSet;

const SUGGESTION_LIMIT: usize = 3;

/// Applies search, mode, specialty and sort stages, in that order.
///
/// The input slice is never reordered; the returned list borrows from it.
/// Without a sort key the input order is kept.
pub fn derive_view<'a>(doctors: &'a [Doctor], filters: &FilterSpec) -> Vec<&'a Doctor> {
    let mut list: Vec<&Doctor> = doctors.iter().collect();

    if let Some(text) = filters.search_text() {
        let needle = text.to_lowercase();
        list.retain(|d| name_matches(d, &needle));
    }

    match filters.mode {
        Some(ConsultMode::VideoConsult) => list.retain(|d| d.video_consult),
        Some(ConsultMode::InClinic) => list.retain(|d| d.in_clinic),
        None => {}
    }

    let wanted = filters.selected_specialties();
    if !wanted.is_empty() {
        list.retain(|d| d.specialities.iter().any(|s| wanted.contains(s)));
    }

    // sort_by_key is stable, so ties keep their filtered order
    match filters.sort {
        Some(SortKey::Fees) => list.sort_by_key(|d| d.fee_amount()),
        Some(SortKey::Experience) => {
            list.sort_by_key(|d| std::cmp::Reverse(d.experience_years()))
        }
        None => {}
    }

    tracing::debug!(
        "Derived {} of {} doctors for {:?}",
        list.len(),
        doctors.len(),
        filters
    );

    list
}

/// Every distinct specialty name across the directory, ascending.
pub fn all_specialties(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(|d| d.specialities.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of filter groups in use. Each of search, mode, specialties and
/// sort adds at most one, however many specialties are selected. Any
/// non-empty search text counts, even blank text that does not filter.
pub fn active_filter_count(filters: &FilterSpec) -> usize {
    [
        filters.search.as_deref().is_some_and(|text| !text.is_empty()),
        filters.mode.is_some(),
        !filters.selected_specialties().is_empty(),
        filters.sort.is_some(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count()
}

/// Up to three name matches for a search box, in directory order.
pub fn suggestions<'a>(doctors: &'a [Doctor], text: &str) -> Vec<&'a Doctor> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let needle = text.to_lowercase();
    doctors
        .iter()
        .filter(|d| name_matches(d, &needle))
        .take(SUGGESTION_LIMIT)
        .collect()
}

fn name_matches(doctor: &Doctor, needle: &str) -> bool {
    doctor.name.to_lowercase().contains(needle)
}
