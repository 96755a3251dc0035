use serde::Serialize;
use std::fmt;

/// Typed, best-effort view of one practitioner record from the directory.
///
/// Built by `core::records`, which never fails on malformed input: missing
/// specialties become an empty list, missing fee/experience text stays `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialities: Vec<String>,
    pub fees: Option<String>,
    pub experience: Option<String>,
    pub video_consult: bool,
    pub in_clinic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsultMode {
    VideoConsult,
    InClinic,
}

impl ConsultMode {
    pub const ALL: [ConsultMode; 2] = [ConsultMode::VideoConsult, ConsultMode::InClinic];

    pub fn label(&self) -> &'static str {
        match self {
            ConsultMode::VideoConsult => "Video Consult",
            ConsultMode::InClinic => "In Clinic",
        }
    }

    /// Exact label match, as written into the address by `core::query`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.label() == label)
    }
}

impl fmt::Display for ConsultMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Ascending by fee amount.
    Fees,
    /// Descending by years of experience.
    Experience,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::Fees, SortKey::Experience];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Fees => "fees",
            SortKey::Experience => "experience",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == key)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's current search/mode/specialty/sort selection.
///
/// `None` always means "no constraint". Edits never mutate a spec in place;
/// every `with_*` / `toggle_*` call returns the replacement spec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub search: Option<String>,
    pub mode: Option<ConsultMode>,
    pub specs: Option<Vec<String>>,
    pub sort: Option<SortKey>,
}

impl FilterSpec {
    /// Search text that actually constrains the result (blank counts as unset).
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|text| !text.trim().is_empty())
    }

    pub fn selected_specialties(&self) -> &[String] {
        self.specs.as_deref().unwrap_or(&[])
    }

    pub fn with_search(&self, text: &str) -> Self {
        Self {
            search: (!text.is_empty()).then(|| text.to_string()),
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: Option<ConsultMode>) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort: Option<SortKey>) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Adds `specialty` if absent, removes it if present. Remaining names
    /// keep their order and duplicates collapse to their first occurrence.
    pub fn toggle_specialty(&self, specialty: &str) -> Self {
        let mut specs: Vec<String> = Vec::new();
        for name in self.selected_specialties() {
            if !specs.contains(name) {
                specs.push(name.clone());
            }
        }

        match specs.iter().position(|name| name == specialty) {
            Some(index) => {
                specs.remove(index);
            }
            None => specs.push(specialty.to_string()),
        }

        Self {
            specs: Some(specs),
            ..self.clone()
        }
    }

    pub fn cleared() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_labels_round_trip() {
        for mode in ConsultMode::ALL {
            assert_eq!(ConsultMode::from_label(mode.label()), Some(mode));
        }
        assert_eq!(ConsultMode::from_label("video consult"), None);
        assert_eq!(ConsultMode::from_label(""), None);
    }

    #[test]
    fn test_sort_keys() {
        assert_eq!(SortKey::from_key("fees"), Some(SortKey::Fees));
        assert_eq!(SortKey::from_key("experience"), Some(SortKey::Experience));
        assert_eq!(SortKey::from_key("rating"), None);
    }

    #[test]
    fn test_blank_search_is_not_a_constraint() {
        let spec = FilterSpec::default().with_search("   ");
        assert_eq!(spec.search.as_deref(), Some("   "));
        assert_eq!(spec.search_text(), None);

        assert_eq!(FilterSpec::default().with_search("").search, None);
    }

    #[test]
    fn test_toggle_specialty_adds_and_removes() {
        let spec = FilterSpec::default()
            .toggle_specialty("Dentist")
            .toggle_specialty("Dermatologist")
            .toggle_specialty("Cardiologist");
        assert_eq!(
            spec.selected_specialties(),
            ["Dentist", "Dermatologist", "Cardiologist"]
        );

        let spec = spec.toggle_specialty("Dermatologist");
        assert_eq!(spec.selected_specialties(), ["Dentist", "Cardiologist"]);
    }

    #[test]
    fn test_toggle_specialty_collapses_duplicates() {
        let spec = FilterSpec {
            specs: Some(vec![
                "Dentist".to_string(),
                "Dentist".to_string(),
                "ENT".to_string(),
            ]),
            ..FilterSpec::default()
        };
        let toggled = spec.toggle_specialty("Dentist");
        assert_eq!(toggled.selected_specialties(), ["ENT"]);
        // the original spec is untouched
        assert_eq!(spec.selected_specialties().len(), 3);
    }

    #[test]
    fn test_edits_keep_other_fields() {
        let spec = FilterSpec::default()
            .with_search("sharma")
            .with_mode(Some(ConsultMode::InClinic))
            .with_sort(Some(SortKey::Fees));
        let spec = spec.with_mode(None);

        assert_eq!(spec.search.as_deref(), Some("sharma"));
        assert_eq!(spec.mode, None);
        assert_eq!(spec.sort, Some(SortKey::Fees));
        assert_eq!(FilterSpec::cleared(), FilterSpec::default());
    }
}
