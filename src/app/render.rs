use crate::core::Doctor;
use crate::utils::error::{FinderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// One rendered page of results.
#[derive(Debug, Serialize)]
pub struct ResultPage<'a> {
    pub address: &'a str,
    pub active_filters: usize,
    pub total: usize,
    pub count: usize,
    pub doctors: &'a [&'a Doctor],
}

impl<'a> ResultPage<'a> {
    pub fn new(
        doctors: &'a [&'a Doctor],
        total: usize,
        active_filters: usize,
        address: &'a str,
    ) -> Self {
        Self {
            address,
            active_filters,
            total,
            count: doctors.len(),
            doctors,
        }
    }
}

pub fn render(format: OutputFormat, page: &ResultPage<'_>) -> Result<String> {
    match format {
        OutputFormat::Text => render_text(page),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(page)?),
        OutputFormat::Csv => render_csv(page.doctors),
    }
}

pub fn result_heading(count: usize) -> String {
    let noun = if count == 1 { "Doctor" } else { "Doctors" };
    format!("{} {} Found", count, noun)
}

pub fn render_card(doctor: &Doctor) -> String {
    format!(
        "{}\n  {}\n  {}\n  {}",
        doctor.name,
        doctor.specialities.join(", "),
        doctor.experience.as_deref().unwrap_or("Experience n/a"),
        doctor.fees.as_deref().unwrap_or("Fee on request"),
    )
}

fn render_text(page: &ResultPage<'_>) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, page).map_err(|e| FinderError::ValidationError {
        message: format!("Failed to format results: {}", e),
    })?;
    Ok(out)
}

fn write_text(out: &mut impl fmt::Write, page: &ResultPage<'_>) -> fmt::Result {
    if page.active_filters > 0 {
        writeln!(out, "Filters ({})", page.active_filters)?;
    }
    writeln!(out, "{}", result_heading(page.count))?;
    writeln!(out)?;

    if page.doctors.is_empty() {
        writeln!(out, "No doctors match your criteria")?;
        writeln!(out, "Try adjusting your filters or search term")?;
    } else {
        for doctor in page.doctors {
            writeln!(out, "{}", render_card(doctor))?;
            writeln!(out)?;
        }
    }

    writeln!(out, "Share: {}", page.address)?;
    write!(out, "{} healthcare professionals available", page.total)
}

fn render_csv(doctors: &[&Doctor]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "name",
        "specialities",
        "fees",
        "experience",
        "video_consult",
        "in_clinic",
    ])?;

    for doctor in doctors {
        let specialities = doctor.specialities.join("; ");
        writer.write_record([
            doctor.id.as_str(),
            doctor.name.as_str(),
            specialities.as_str(),
            doctor.fees.as_deref().unwrap_or(""),
            doctor.experience.as_deref().unwrap_or(""),
            if doctor.video_consult { "true" } else { "false" },
            if doctor.in_clinic { "true" } else { "false" },
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FinderError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| FinderError::ValidationError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor() -> Doctor {
        Doctor {
            id: "42".to_string(),
            name: "Dr. Meera Iyer".to_string(),
            specialities: vec!["Dentist".to_string(), "Orthodontist".to_string()],
            fees: Some("₹ 700".to_string()),
            experience: None,
            video_consult: true,
            in_clinic: false,
        }
    }

    #[test]
    fn test_result_heading_pluralises() {
        assert_eq!(result_heading(0), "0 Doctors Found");
        assert_eq!(result_heading(1), "1 Doctor Found");
        assert_eq!(result_heading(12), "12 Doctors Found");
    }

    #[test]
    fn test_card_fallbacks() {
        let mut d = doctor();
        assert_eq!(
            render_card(&d),
            "Dr. Meera Iyer\n  Dentist, Orthodontist\n  Experience n/a\n  ₹ 700"
        );
        d.fees = None;
        assert!(render_card(&d).ends_with("Fee on request"));
    }

    #[test]
    fn test_text_empty_result() {
        let page = ResultPage::new(&[], 8, 2, "?mode=In+Clinic&sort=fees");
        let text = render(OutputFormat::Text, &page).unwrap();
        assert!(text.starts_with("Filters (2)\n0 Doctors Found"));
        assert!(text.contains("No doctors match your criteria"));
        assert!(text.contains("Share: ?mode=In+Clinic&sort=fees"));
        assert!(text.ends_with("8 healthcare professionals available"));
    }

    #[test]
    fn test_text_lists_cards_between_heading_and_footer() {
        let d = doctor();
        let doctors = [&d, &d];
        let page = ResultPage::new(&doctors, 5, 1, "?spec=Dentist");
        let text = render(OutputFormat::Text, &page).unwrap();

        let expected_card = render_card(&d);
        assert_eq!(text.matches(expected_card.as_str()).count(), 2);
        assert_eq!(text.lines().next(), Some("Filters (1)"));
        assert_eq!(text.lines().nth(1), Some("2 Doctors Found"));
        assert!(text.ends_with("Share: ?spec=Dentist\n5 healthcare professionals available"));
    }

    #[test]
    fn test_text_without_filters_has_no_filter_line() {
        let d = doctor();
        let doctors = [&d];
        let page = ResultPage::new(&doctors, 1, 0, "?");
        let text = render(OutputFormat::Text, &page).unwrap();
        assert!(text.starts_with("1 Doctor Found"));
        assert!(text.contains("Dr. Meera Iyer"));
    }

    #[test]
    fn test_json_output() {
        let d = doctor();
        let doctors = [&d];
        let page = ResultPage::new(&doctors, 3, 1, "?search=meera");
        let json: serde_json::Value =
            serde_json::from_str(&render(OutputFormat::Json, &page).unwrap()).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["total"], 3);
        assert_eq!(json["address"], "?search=meera");
        assert_eq!(json["doctors"][0]["specialities"][1], "Orthodontist");
        assert_eq!(json["doctors"][0]["experience"], serde_json::Value::Null);
    }

    #[test]
    fn test_csv_output() {
        let d = doctor();
        let doctors = [&d];
        let page = ResultPage::new(&doctors, 1, 0, "?");
        let csv = render(OutputFormat::Csv, &page).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "id,name,specialities,fees,experience,video_consult,in_clinic"
        );
        assert_eq!(lines[1], "42,Dr. Meera Iyer,Dentist; Orthodontist,₹ 700,,true,false");
    }
}
