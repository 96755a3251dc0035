//! Total parsing of loosely shaped directory JSON into [`Doctor`] values.
//!
//! Nothing here returns an error. Unexpected shapes fall back to empty
//! strings, empty specialty lists, `None` text fields and zero amounts.

use crate::domain::model::Doctor;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("static pattern compiles"));

impl Doctor {
    /// Returns `None` only when `value` is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        Some(Self {
            id: obj.get("id").and_then(scalar_text).unwrap_or_default(),
            name: obj
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            specialities: obj
                .get("specialities")
                .map(specialty_names)
                .unwrap_or_default(),
            fees: obj.get("fees").and_then(scalar_text),
            experience: obj.get("experience").and_then(scalar_text),
            video_consult: obj
                .get("video_consult")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            in_clinic: obj
                .get("in_clinic")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }

    pub fn fee_amount(&self) -> u64 {
        fee_amount(self.fees.as_deref())
    }

    pub fn experience_years(&self) -> u64 {
        experience_years(self.experience.as_deref())
    }
}

/// Parses a JSON array into doctors, skipping entries that are not objects.
pub fn parse_doctors(items: &[Value]) -> Vec<Doctor> {
    let doctors: Vec<Doctor> = items.iter().filter_map(Doctor::from_value).collect();
    let skipped = items.len() - doctors.len();
    if skipped > 0 {
        tracing::debug!("Skipped {} non-object directory entries", skipped);
    }
    doctors
}

/// Names from a `[{ "name": ... }]` list. Entries without a non-empty
/// string `name` are dropped; anything other than an array yields nothing.
pub fn specialty_names(value: &Value) -> Vec<String> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| entry.get("name").and_then(Value::as_str))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// All ASCII digits in `text` read as one number, so `"₹ 1,500"` is 1500.
/// No digits means zero. Saturates instead of overflowing.
pub fn fee_amount(text: Option<&str>) -> u64 {
    text.map(|text| {
        text.bytes()
            .filter(u8::is_ascii_digit)
            .fold(0u64, |acc, digit| {
                acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
            })
    })
    .unwrap_or(0)
}

/// First run of ASCII digits in `text`, so `"13 Years of experience"` is 13.
pub fn experience_years(text: Option<&str>) -> u64 {
    text.and_then(|text| FIRST_NUMBER.find(text))
        .map(|digits| {
            digits.as_str().bytes().fold(0u64, |acc, digit| {
                acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
            })
        })
        .unwrap_or(0)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
