//! Tests for the curve measurement maps on gamma-variate bolus curves

use approx::assert_relative_eq;
use perfsol::data::{auc, AUCMethod, ConcentrationConversion, CurveError};
use perfsol::maps::*;
use perfsol::PerfsolError;

const FRAMES: usize = 40;
const DT: f64 = 1.5;
const ARRIVAL: usize = 10;
const S0: f64 = 500.0;

fn times() -> Vec<f64> {
    (0..FRAMES).map(|i| 3600.0 + DT * i as f64).collect()
}

fn relative() -> Vec<f64> {
    (0..FRAMES).map(|i| DT * i as f64).collect()
}

/// Unit-peak bolus shape, zero up to and including the arrival frame
fn gamma_variate(t: f64) -> f64 {
    let x = t - ARRIVAL as f64 * DT;
    if x <= 0.0 {
        return 0.0;
    }
    (x / 3.0).powi(3) * (3.0 - x).exp()
}

fn concentration(depth: f64) -> Vec<f64> {
    relative().iter().map(|&t| depth * gamma_variate(t)).collect()
}

fn signal(depth: f64) -> Vec<f64> {
    concentration(depth)
        .into_iter()
        .map(|c| S0 * (-c).exp())
        .collect()
}

fn options() -> MapOptions {
    MapOptions::default().with_conversion(ConcentrationConversion::NegLogRatio {
        baseline_frames: ARRIVAL,
    })
}

fn maps(reference: Option<Vec<f64>>, options: MapOptions) -> CurveMaps {
    CurveMaps::init(&times(), reference, options).unwrap()
}

#[test]
fn test_area_matches_concentration_integral() {
    let maps = maps(None, options());
    let expected = auc(&relative(), &concentration(0.8), AUCMethod::Linear).unwrap();
    assert_relative_eq!(maps.area(&signal(0.8)).unwrap(), expected, epsilon = 1e-9);
}

#[test]
fn test_windowed_basic_measures() {
    // Eight frames starting at arrival cover the rise and the peak
    let maps = maps(None, options().with_window(FrameWindow::new(ARRIVAL, 8)));
    assert_eq!(maps.window(), (ARRIVAL, ARRIVAL + 7));

    let basic = maps.basic(&signal(1.2)).unwrap();
    let windowed = &concentration(1.2)[ARRIVAL..ARRIVAL + 8];
    let max = windowed.iter().cloned().fold(f64::MIN, f64::max);
    assert_relative_eq!(basic.max, max, epsilon = 1e-9);
    assert_relative_eq!(basic.spread, max, epsilon = 1e-9);
    assert!(basic.mean > 0.0 && basic.mean < basic.max);
}

#[test]
fn test_reference_match_scales_with_depth() {
    let reference = concentration(0.8);
    let l1 = maps(Some(reference.clone()), options().with_norm(DistanceNorm::L1));
    let l2 = maps(Some(reference.clone()), options());

    let same = l1.reference_match(&signal(0.8)).unwrap().unwrap();
    assert_relative_eq!(same.distance, 0.0, epsilon = 1e-9);

    // Twice the depth leaves a difference equal to the reference itself
    let double = l1.reference_match(&signal(1.6)).unwrap().unwrap();
    let area = auc(&relative(), &reference, AUCMethod::Linear).unwrap();
    assert_relative_eq!(double.distance, area, epsilon = 1e-9);
    assert_relative_eq!(double.correlation.unwrap(), 1.0, epsilon = 1e-9);

    let double = l2.reference_match(&signal(1.6)).unwrap().unwrap();
    assert!(double.distance > 0.0);
}

#[test]
fn test_active_rise_time_independent_of_depth() {
    let maps = maps(None, options());
    let shallow = maps.active_rise(&signal(0.5)).unwrap().unwrap();
    let deep = maps.active_rise(&signal(1.0)).unwrap().unwrap();

    assert!(shallow.time > 0.0 && shallow.time < 3.0 * DT * 2.0);
    assert_relative_eq!(shallow.time, deep.time, epsilon = 1e-6);
    assert_relative_eq!(deep.slope, 2.0 * shallow.slope, epsilon = 1e-6);

    // Flat curve converts to zero and has no rise
    assert_eq!(maps.active_rise(&[S0; FRAMES]).unwrap(), None);
}

#[test]
fn test_interleaved_stats_on_raw_signal() {
    let maps = maps(None, options());
    let stats = maps.interleaved(&[S0; FRAMES]).unwrap();
    assert_eq!(stats.odd_mean, S0);
    assert_eq!(stats.even_mean, S0);
    assert_eq!(stats.odd_sd, 0.0);
}

#[test]
fn test_evaluate_all_isolates_failures() {
    let maps = maps(Some(concentration(0.8)), options());
    let mut nan = signal(1.0);
    nan[5] = f64::NAN;
    let curves = vec![signal(0.8), nan, vec![S0; 3], signal(1.4)];

    let results = maps.evaluate_all(&curves);
    assert_eq!(results.len(), 4);
    assert_eq!(results[0], maps.evaluate(&curves[0]));
    assert_eq!(
        results[1],
        Err(MapError::Curve(CurveError::NonFinite { index: 5 }))
    );
    assert!(matches!(results[2], Err(MapError::LengthMismatch { found: 3, .. })));
    let deep = results[3].as_ref().unwrap();
    assert!(deep.area > results[0].as_ref().unwrap().area);
    assert!(deep.reference.is_some());
}

#[test]
fn test_options_from_partial_json() {
    let options = MapOptions::from_json(r#"{"norm": "L1", "window": {"start": 2}}"#).unwrap();
    assert_eq!(options.norm, DistanceNorm::L1);
    assert_eq!(options.window, FrameWindow::new(2, 0));
    assert_eq!(options.rise, RiseThresholds::default());
    assert_eq!(options.conversion, ConcentrationConversion::None);

    let json = self::options().to_json().unwrap();
    assert_eq!(MapOptions::from_json(&json).unwrap(), self::options());

    assert!(matches!(
        MapOptions::from_json("{\"norm\": \"L3\"}"),
        Err(PerfsolError::Options(_))
    ));
}

#[test]
fn test_map_errors_convert_to_crate_error() {
    let err = CurveMaps::init(&times(), None, options().with_window(FrameWindow::new(FRAMES, 0)))
        .unwrap_err();
    assert_eq!(
        err,
        MapError::InvalidWindow {
            start: FRAMES,
            length: 0,
            frames: FRAMES
        }
    );
    let err: PerfsolError = err.into();
    assert!(matches!(err, PerfsolError::Maps(MapError::InvalidWindow { .. })));
}
