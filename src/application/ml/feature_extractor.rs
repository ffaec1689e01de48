use crate::domain::applicant::{ApplicantRecord, Field};
use crate::domain::ml::feature_registry::{Decision, FeatureVector, LabeledRow};
use statrs::statistics::{Data, Median};
use tracing::{debug, info, warn};

/// Median of the non-missing values of one column across the batch.
fn batch_median<'a>(column: impl Iterator<Item = &'a Field<f64>>) -> Option<f64> {
    let values: Vec<f64> = column.filter_map(Field::value).collect();
    if values.is_empty() {
        return None;
    }
    Some(Data::new(values).median())
}

fn imputed_median<'a>(
    name: &str,
    column: impl Iterator<Item = &'a Field<f64>>,
) -> f64 {
    match batch_median(column) {
        Some(median) => {
            debug!("Imputing missing {} with batch median {}", name, median);
            median
        }
        None => {
            warn!("No {} values in batch, imputing 0 for missing entries", name);
            0.0
        }
    }
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Converts raw applicant records into labeled feature rows.
///
/// Rows keep their input order and none are dropped. Missing `FICOScore` and
/// `RentToIncomeRatio` take the median of this batch, missing income and asset
/// values take `0`.
pub fn extract(records: &[ApplicantRecord]) -> Vec<LabeledRow> {
    if records.is_empty() {
        return Vec::new();
    }

    let fico_median = imputed_median("FICOScore", records.iter().map(|r| &r.fico_score));
    let rent_ratio_median = imputed_median(
        "RentToIncomeRatio",
        records.iter().map(|r| &r.rent_to_income_ratio),
    );

    let rows: Vec<LabeledRow> = records
        .iter()
        .map(|record| LabeledRow {
            features: FeatureVector {
                monthly_income: record.monthly_income.value().unwrap_or(0.0),
                fico_score: record.fico_score.value().unwrap_or(fico_median),
                rent_to_income_ratio: record
                    .rent_to_income_ratio
                    .value()
                    .unwrap_or(rent_ratio_median),
                has_criminal_record: flag(record.has_criminal_record()),
                has_eviction_history: flag(record.has_eviction_history()),
                asset_monthly_value: record.asset_monthly_value.value().unwrap_or(0.0),
            },
            label: if record.passed() {
                Decision::Accepted
            } else {
                Decision::Declined
            },
        })
        .collect();

    let accepted = rows
        .iter()
        .filter(|r| r.label == Decision::Accepted)
        .count();
    info!(
        "Extracted {} rows ({} accepted, {} declined)",
        rows.len(),
        accepted,
        rows.len() - accepted
    );

    rows
}
