//! Tests for batch evaluation and summaries

use ndarray::Array2;
use perfsol::cbv::*;

fn acquisition() -> Acquisition {
    let times: Vec<f64> = (0..12).map(|i| 2.0 * i as f64).collect();
    let global = vec![
        100.0, 100.0, 100.0, 100.0, 100.0, 98.0, 60.0, 40.0, 35.0, 70.0, 100.0, 100.0,
    ];
    Acquisition::init(AcquisitionConfig::new(times, global, 1.0)).unwrap()
}

fn tissue(scale: f64) -> Vec<f64> {
    [100.0, 100.0, 100.0, 98.0, 60.0, 40.0, 35.0, 42.0, 70.0, 95.0, 100.0, 100.0]
        .iter()
        .map(|v| v * scale)
        .collect()
}

fn mixed_batch() -> Vec<Vec<f64>> {
    let mut nan = tissue(1.0);
    nan[3] = f64::NAN;
    // Minimum in the last frame, inside the post-baseline
    let mut late = vec![100.0; 12];
    late[1] = 101.0;
    late[2] = 99.0;
    late[11] = 50.0;
    vec![
        tissue(1.0),
        vec![5.0; 12],
        tissue(2.0),
        nan,
        vec![100.0; 12],
        tissue(0.8),
        late,
    ]
}

#[test]
fn test_evaluate_all_preserves_order() {
    let acq = acquisition();
    let curves = mixed_batch();
    let outcomes = acq.evaluate_all(&curves);

    assert_eq!(outcomes.len(), curves.len());
    for (outcome, curve) in outcomes.iter().zip(&curves) {
        assert_eq!(*outcome, acq.evaluate(curve));
    }

    assert!(outcomes[0].as_ref().unwrap().value().is_some());
    assert!(outcomes[1].as_ref().unwrap().is_void());
    assert_eq!(outcomes[3], Err(VoxelError::NonFiniteSample { index: 3 }));
    assert_eq!(outcomes[4], Ok(VoxelOutcome::Value(0.0)));
    assert_eq!(outcomes[6], Err(VoxelError::NoBolus { start: 11, end: 9 }));
}

#[test]
fn test_evaluate_all_accepts_slices() {
    let acq = acquisition();
    let a = tissue(1.0);
    let b = tissue(1.5);
    let curves: Vec<&[f64]> = vec![a.as_slice(), b.as_slice()];
    let outcomes = acq.evaluate_all(&curves);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.is_ok()));
}

#[test]
fn test_evaluate_rows_matches_evaluate_all() {
    let acq = acquisition();
    let curves = mixed_batch();
    let flat: Vec<f64> = curves.iter().flatten().copied().collect();
    let matrix = Array2::from_shape_vec((curves.len(), 12), flat).unwrap();

    let rows = acq.evaluate_rows(matrix.view()).unwrap();
    assert_eq!(rows, acq.evaluate_all(&curves));
}

#[test]
fn test_evaluate_rows_rejects_wrong_width() {
    let acq = acquisition();
    let matrix = Array2::<f64>::zeros((4, 10));
    assert!(matches!(
        acq.evaluate_rows(matrix.view()),
        Err(CbvError::LengthMismatch {
            expected: 12,
            found: 10,
            ..
        })
    ));
}

#[test]
fn test_summary_of_mixed_batch() {
    let acq = acquisition();
    let outcomes = acq.evaluate_all(&mixed_batch());
    let summary = summarize(&outcomes);

    assert_eq!(summary.n_voxels, 7);
    assert_eq!(summary.n_valid, 4);
    assert_eq!(summary.n_void, 1);
    assert_eq!(summary.n_failed, 2);
    assert_eq!(summary.failures["non_finite_sample"], 1);
    assert_eq!(summary.failures["no_bolus"], 1);

    let values = summary.values.unwrap();
    assert_eq!(values.n, 4);
    assert_eq!(values.min, 0.0);
    assert!(values.min <= values.median && values.median <= values.max);
}

#[test]
fn test_summary_serializes() {
    let acq = acquisition();
    let summary = summarize(&acq.evaluate_all(&mixed_batch()));
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"n_valid\":4"));
    assert!(json.contains("no_bolus"));
}
