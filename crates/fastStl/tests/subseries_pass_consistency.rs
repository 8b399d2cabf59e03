#![cfg(all(feature = "dev", feature = "cpu"))]
use approx::assert_abs_diff_eq;

use fastStl::internals::engine::executor::subseries_pass_parallel;
use stl::internals::engine::decomposition::StlExecutor;

#[test]
fn test_subseries_pass_consistency() {
    let n = 50;
    let period = 5;
    let detrended: Vec<Option<f64>> = (0..n)
        .map(|i| {
            if i % 13 == 4 {
                None
            } else {
                Some((i as f64 * 0.7).sin())
            }
        })
        .collect();
    let weights: Vec<f64> = (0..n).map(|i| 1.0 - (i % 7) as f64 / 10.0).collect();

    let seq = StlExecutor::subseries_pass(&detrended, &weights, period, 7).unwrap();
    let par = subseries_pass_parallel(&detrended, &weights, period, 7).unwrap();

    assert_eq!(seq.len(), n + 2 * period);
    assert_eq!(par.len(), seq.len());
    for i in 0..seq.len() {
        assert_abs_diff_eq!(seq[i], par[i], epsilon = 1e-12);
    }
}

#[test]
fn test_subseries_pass_reports_empty_phase() {
    let detrended: Vec<Option<f64>> = (0..12)
        .map(|i| if i % 3 == 0 { None } else { Some(1.0) })
        .collect();
    let weights = vec![1.0; 12];

    assert!(subseries_pass_parallel(&detrended, &weights, 3, 7).is_err());
}
