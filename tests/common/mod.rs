#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh, empty directory under the system temp dir.
pub fn unique_temp_dir(tag: &str) -> PathBuf {
    let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "tenant_screening_{}_{}_{}",
        tag,
        std::process::id(),
        unique_id
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create test temp dir");
    dir
}

/// Synthetic history where acceptance depends only on FICO >= 650.
pub fn fico_driven_csv(n: usize) -> String {
    let mut csv = String::from(
        "MonthlyIncome,FICOScore,RentToIncomeRatio,AssetMonthlyValue,CriminalFelonyCount,EvictionCount,ApplicationResult\n",
    );
    for i in 0..n {
        let fico = 500 + (i * 37) % 350;
        let income = 3000 + (i * 53) % 4000;
        let ratio = 0.2 + ((i * 7) % 20) as f64 / 100.0;
        let assets = (i * 131) % 20000;
        let felony = usize::from(i % 11 == 0);
        let evictions = usize::from(i % 13 == 0);
        let result = if fico >= 650 {
            "Passed - meets criteria"
        } else {
            "FAILED - credit"
        };
        csv.push_str(&format!(
            "{},{},{:.2},{},{},{},{}\n",
            income, fico, ratio, assets, felony, evictions, result
        ));
    }
    csv
}
