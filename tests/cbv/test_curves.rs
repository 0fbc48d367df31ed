//! Tests for the curve-level primitives

use approx::assert_relative_eq;
use perfsol::data::*;

#[test]
fn test_relative_times_from_scanner_clock() {
    let times = relative_times(&[36000.0, 36001.5, 36003.0, 36004.5]).unwrap();
    assert_eq!(times, vec![0.0, 1.5, 3.0, 4.5]);
}

#[test]
fn test_relative_times_rejects_bad_input() {
    assert_eq!(relative_times(&[]), Err(CurveError::InsufficientData { n: 0, required: 1 }));
    assert_eq!(
        relative_times(&[0.0, 2.0, 1.0]),
        Err(CurveError::InvalidTimeSequence)
    );
    assert_eq!(
        relative_times(&[0.0, f64::INFINITY]),
        Err(CurveError::NonFinite { index: 1 })
    );
}

#[test]
fn test_auc_methods_agree_on_rising_curve() {
    let times = [0.0, 1.0, 2.0, 3.0];
    let values = [0.0, 1.0, 2.0, 3.0];
    let linear = auc(&times, &values, AUCMethod::Linear).unwrap();
    let log_down = auc(&times, &values, AUCMethod::LinUpLogDown).unwrap();
    assert_relative_eq!(linear, 4.5, epsilon = 1e-12);
    assert_relative_eq!(linear, log_down, epsilon = 1e-12);
}

#[test]
fn test_auc_log_down_below_linear_on_decay() {
    let times = [0.0, 1.0, 2.0, 3.0];
    let values = [8.0, 4.0, 2.0, 1.0];
    let linear = auc(&times, &values, AUCMethod::Linear).unwrap();
    let log_down = auc(&times, &values, AUCMethod::LinUpLogDown).unwrap();
    assert!(log_down < linear);
}

#[test]
fn test_auc_range_closed_interval() {
    let times = [0.0, 1.0, 2.0, 3.0, 4.0];
    let values = [0.0, 2.0, 2.0, 2.0, 0.0];
    let inner = auc_range(&times, &values, 1, 3, AUCMethod::Linear).unwrap();
    assert_relative_eq!(inner, 4.0, epsilon = 1e-12);
    assert!(auc_range(&times, &values, 3, 5, AUCMethod::Linear).is_err());
}

#[test]
fn test_neg_log_ratio_matches_conversion() {
    let signal = [100.0, 100.0, 50.0, 25.0, 100.0];
    let conc = signal_to_concentration(
        &signal,
        ConcentrationConversion::NegLogRatio { baseline_frames: 2 },
    )
    .unwrap();

    for (c, s) in conc.iter().zip(signal) {
        assert_eq!(*c, neg_log_ratio(s / 100.0));
    }
    assert_relative_eq!(conc[3], 4.0_f64.ln(), epsilon = 1e-12);
}

#[test]
fn test_min_magnitude_sees_negative_samples() {
    assert_eq!(min_magnitude(&[50.0, -3.0, 20.0]), 3.0);
    let (mean, sd) = mean_stdev(&[2.0, 4.0, 6.0]).unwrap();
    assert_relative_eq!(mean, 4.0, epsilon = 1e-12);
    assert_relative_eq!(sd, 2.0, epsilon = 1e-12);
}
