use std::path::PathBuf;

use diabetes_risk_data::store::{get_model, initialize_model_store, is_model_loaded};

const FEATURES: [&str; 8] = [
    "pregnancies",
    "glucose",
    "blood_pressure",
    "skin_thickness",
    "insulin",
    "bmi",
    "diabetes_pedigree",
    "age",
];

fn bundled_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../models/diabetes_model.json")
}

#[test]
fn test_bundled_model_loads_into_store() {
    assert!(!is_model_loaded());

    let model = initialize_model_store(bundled_model_path(), &FEATURES).unwrap();
    assert_eq!(model.name, "pima-logistic-regression");
    assert_eq!(model.kind(), "logistic_regression");
    assert!(is_model_loaded());

    let stored = get_model().unwrap();
    let elevated = [6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0];
    let typical = [1.0, 85.0, 66.0, 29.0, 0.0, 26.6, 0.35, 31.0];
    assert_eq!(stored.predict_class(&elevated).unwrap(), 1);
    assert_eq!(stored.predict_class(&typical).unwrap(), 0);

    let p = stored.positive_probability(&elevated).unwrap();
    assert!(p > 0.65 && p < 0.75);
}
