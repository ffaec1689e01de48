//! Raw applicant records as they arrive from historical application exports.
//!
//! Every column is optional. A column that does not exist in the source file is
//! [`Field::Absent`], a column that exists but has an empty cell or a missing-value
//! marker such as `NA` is [`Field::Null`], so the two states stay distinguishable all
//! the way into feature extraction.

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Tri-state cell value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field<T> {
    #[default]
    Absent,
    Null,
    Present(T),
}

impl<T> Field<T> {
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            Field::Absent | Field::Null => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }
}

impl Field<f64> {
    /// Numeric value, with `NaN` treated the same as an empty cell.
    pub fn value(&self) -> Option<f64> {
        self.as_option().copied().filter(|v| !v.is_nan())
    }

    /// True when the value is present and strictly positive (count columns).
    pub fn is_positive(&self) -> bool {
        self.value().is_some_and(|v| v > 0.0)
    }

    /// True when the value is present and equal to 1 (flag columns).
    pub fn is_flagged(&self) -> bool {
        self.value().is_some_and(|v| v == 1.0)
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Null, Field::Present)
    }
}

/// Cell texts that exports use for "no value". Matched exactly, like
/// pandas' default `na_values`.
pub const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing_marker(text: &str) -> bool {
    MISSING_MARKERS.contains(&text.trim())
}

/// Accepts numbers, `true`/`false` in any case (as 1/0) and missing markers.
struct NumericCellVisitor;

impl<'de> Visitor<'de> for NumericCellVisitor {
    type Value = Field<f64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a boolean or a missing-value marker")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Field::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Field::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Field::Present(if v { 1.0 } else { 0.0 }))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Field::Present(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Field::Present(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Field::Present(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let text = v.trim();
        if text.is_empty() || is_missing_marker(text) {
            return Ok(Field::Null);
        }
        if text.eq_ignore_ascii_case("true") {
            return self.visit_bool(true);
        }
        if text.eq_ignore_ascii_case("false") {
            return self.visit_bool(false);
        }
        text.parse::<f64>()
            .map(Field::Present)
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for Field<f64> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(NumericCellVisitor)
    }
}

impl<'de> Deserialize<'de> for Field<String> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(text) if is_missing_marker(&text) => Field::Null,
            other => Field::from(other),
        })
    }
}

/// One historical or prospective application
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicantRecord {
    #[serde(rename = "MonthlyIncome", default)]
    pub monthly_income: Field<f64>,
    #[serde(rename = "FICOScore", default)]
    pub fico_score: Field<f64>,
    #[serde(rename = "RentToIncomeRatio", default)]
    pub rent_to_income_ratio: Field<f64>,
    #[serde(rename = "AssetMonthlyValue", default)]
    pub asset_monthly_value: Field<f64>,

    #[serde(rename = "CriminalFederalCount", default)]
    pub criminal_federal_count: Field<f64>,
    #[serde(rename = "CriminalFelonyCount", default)]
    pub criminal_felony_count: Field<f64>,
    #[serde(rename = "CriminalMisdemeanorCount", default)]
    pub criminal_misdemeanor_count: Field<f64>,
    #[serde(rename = "Failed_Criminal", default)]
    pub failed_criminal: Field<f64>,

    #[serde(rename = "EvictionCount", default)]
    pub eviction_count: Field<f64>,
    #[serde(rename = "Failed_Eviction", default)]
    pub failed_eviction: Field<f64>,

    /// Free-text outcome, only meaningful for training data
    #[serde(rename = "ApplicationResult", default)]
    pub application_result: Field<String>,
}

impl ApplicantRecord {
    pub fn has_criminal_record(&self) -> bool {
        self.criminal_federal_count.is_positive()
            || self.criminal_felony_count.is_positive()
            || self.criminal_misdemeanor_count.is_positive()
            || self.failed_criminal.is_flagged()
    }

    pub fn has_eviction_history(&self) -> bool {
        self.eviction_count.is_positive() || self.failed_eviction.is_flagged()
    }

    /// Whether the recorded outcome counts as an acceptance.
    pub fn passed(&self) -> bool {
        self.application_result
            .as_option()
            .is_some_and(|text| text.to_uppercase().contains("PASSED"))
    }
}
