use tenant_screening::application::tenant_service;
use tenant_screening::domain::ml::feature_registry::Decision;

#[test]
fn test_indicator_columns() {
    let csv = "\
FICOScore,CriminalFederalCount,CriminalFelonyCount,CriminalMisdemeanorCount,Failed_Criminal,EvictionCount,Failed_Eviction,ApplicationResult
700,0,1,0,0,0,0,PASSED
700,0,0,0,0,0,0,PASSED
700,,,,1,,,PASSED
700,0,0,0,0,0,1,PASSED
700,0,0,0,0,3,0,PASSED
";
    let rows = tenant_service::parse_reader(csv.as_bytes()).unwrap();

    let criminal: Vec<f64> = rows.iter().map(|r| r.features.has_criminal_record).collect();
    let eviction: Vec<f64> = rows.iter().map(|r| r.features.has_eviction_history).collect();
    assert_eq!(criminal, vec![1.0, 0.0, 1.0, 0.0, 0.0]);
    assert_eq!(eviction, vec![0.0, 0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn test_absent_indicator_columns_are_false() {
    let csv = "MonthlyIncome,FICOScore\n4000,680\n";
    let rows = tenant_service::parse_reader(csv.as_bytes()).unwrap();
    assert_eq!(rows[0].features.has_criminal_record, 0.0);
    assert_eq!(rows[0].features.has_eviction_history, 0.0);
    assert_eq!(rows[0].label, Decision::Declined);
}

#[test]
fn test_label_mapping() {
    let csv = "FICOScore,ApplicationResult\n700,passed review\n700,FAILED - low income\n700,\n";
    let rows = tenant_service::parse_reader(csv.as_bytes()).unwrap();
    let labels: Vec<Decision> = rows.iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        vec![Decision::Accepted, Decision::Declined, Decision::Declined]
    );
}

#[test]
fn test_median_imputation_per_batch() {
    let csv = "FICOScore,RentToIncomeRatio\n600,0.2\n,\n700,0.4\n";
    let rows = tenant_service::parse_reader(csv.as_bytes()).unwrap();
    assert_eq!(rows[1].features.fico_score, 650.0);
    assert!((rows[1].features.rent_to_income_ratio - 0.3).abs() < 1e-12);

    // A different batch gives a different median
    let csv = "FICOScore,MonthlyIncome\n500,4000\n,3000\n";
    let rows = tenant_service::parse_reader(csv.as_bytes()).unwrap();
    assert_eq!(rows[1].features.fico_score, 500.0);
}

#[test]
fn test_non_numeric_cell_is_error() {
    let csv = "MonthlyIncome,FICOScore\nplenty,700\n";
    assert!(tenant_service::parse_reader(csv.as_bytes()).is_err());
}

#[test]
fn test_empty_file_gives_no_rows() {
    let csv = "MonthlyIncome,FICOScore,ApplicationResult\n";
    assert!(tenant_service::parse_reader(csv.as_bytes()).unwrap().is_empty());
}

#[test]
fn test_missing_markers_are_imputed() {
    let csv = "\
MonthlyIncome,FICOScore,RentToIncomeRatio,AssetMonthlyValue,Failed_Criminal,Failed_Eviction,ApplicationResult
4000,600,0.2,100,False,False,PASSED
NA,N/A,null,NULL,True,NA,FAILED
3000,700,0.4,50,false,TRUE,passed
";
    let rows = tenant_service::parse_reader(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 3);

    let imputed = &rows[1].features;
    assert_eq!(imputed.monthly_income, 0.0);
    assert_eq!(imputed.fico_score, 650.0);
    assert!((imputed.rent_to_income_ratio - 0.3).abs() < 1e-12);
    assert_eq!(imputed.asset_monthly_value, 0.0);

    let criminal: Vec<f64> = rows.iter().map(|r| r.features.has_criminal_record).collect();
    let eviction: Vec<f64> = rows.iter().map(|r| r.features.has_eviction_history).collect();
    assert_eq!(criminal, vec![0.0, 1.0, 0.0]);
    assert_eq!(eviction, vec![0.0, 0.0, 1.0]);
}
