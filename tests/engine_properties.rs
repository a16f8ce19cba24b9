use approx::assert_relative_eq;
use tensile_analyzer::math;
use tensile_analyzer::prelude::*;

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
        .collect()
}

/// Elastic-plastic curve with a little deterministic wiggle
fn wavy_curve(n: usize) -> (Vec<f64>, Vec<f64>) {
    let strain = linspace(0.0, 0.2, n);
    let stress = strain
        .iter()
        .enumerate()
        .map(|(i, &e)| {
            let base = if e < 0.0015 {
                200_000.0 * e
            } else {
                300.0 + 400.0 * (e - 0.0015).powf(0.4)
            };
            base + 3.0 * (i as f64 * 0.7).sin()
        })
        .collect();
    (strain, stress)
}

/// Elastic to 500 MPa at 200 GPa, then linear hardening at 1 GPa
fn bilinear(e: f64) -> f64 {
    if e <= 0.0025 {
        200_000.0 * e
    } else {
        500.0 + 1000.0 * (e - 0.0025)
    }
}

fn bilinear_curve() -> (Vec<f64>, Vec<f64>) {
    let strain: Vec<f64> = (0..=80).map(|i| i as f64 * 0.00025).collect();
    let stress = strain.iter().map(|&e| bilinear(e)).collect();
    (strain, stress)
}

#[test]
fn test_smoothing_preserves_length() {
    let engine = AnalysisEngine::default();
    for n in [11, 12, 13, 50, 101] {
        let (_, stress) = wavy_curve(n);
        assert_eq!(engine.smooth(&stress).unwrap().len(), n);
    }
}

#[test]
fn test_all_values_non_negative() {
    let engine = AnalysisEngine::default();
    let strain = linspace(0.0, 0.05, 40);
    let stress: Vec<f64> = strain.iter().map(|e| -1000.0 * e - 5.0).collect();
    let r = engine.compute(&strain, &stress);
    for (kind, value) in r.entries() {
        assert!(value >= 0.0, "{} is negative: {}", kind, value);
    }

    let (strain, stress) = wavy_curve(80);
    let r = engine.compute(&strain, &stress);
    assert!(r.entries().iter().all(|(_, v)| *v >= 0.0));
}

#[test]
fn test_sparse_elastic_region_gives_default_modulus() {
    // 5 samples at or below 0.2% strain, steep curve afterwards
    let mut strain: Vec<f64> = vec![0.0, 0.0005, 0.001, 0.0015, 0.002];
    strain.extend(linspace(0.01, 0.3, 30));
    let stress: Vec<f64> = strain.iter().map(|e| 900_000.0 * e).collect();
    let r = AnalysisEngine::default().compute(&strain, &stress);
    assert!(!r.is_fallback());
    assert_eq!(r.elastic_modulus, 200.0);
}

#[test]
fn test_toughness_matches_trapezoid() {
    let engine = AnalysisEngine::default();
    for n in [8, 60] {
        let (strain, stress) = wavy_curve(n);
        let smooth = engine.smooth(&stress).unwrap();
        let expected = math::trapezoid(&smooth, &strain) / engine.options().toughness_scale;
        let r = engine.compute(&strain, &stress);
        assert_relative_eq!(r.toughness, expected, max_relative = 1e-6);
    }
}

#[test]
fn test_toughness_scale_is_configurable() {
    let (strain, stress) = wavy_curve(60);
    let a = AnalysisEngine::default().compute(&strain, &stress);
    let b = AnalysisEngine::new(AnalysisOptions::default().with_toughness_scale(1e6))
        .compute(&strain, &stress);
    assert_relative_eq!(a.toughness, b.toughness * 1000.0, max_relative = 1e-9);
}

#[test]
fn test_linear_curve_recovers_modulus() {
    let strain = linspace(0.0, 0.01, 100);
    let stress: Vec<f64> = strain.iter().map(|e| 200_000.0 * e).collect();
    let r = AnalysisEngine::default().compute(&strain, &stress);
    assert_relative_eq!(r.elastic_modulus, 200.0, max_relative = 0.05);
    assert_relative_eq!(r.tensile_strength, 2000.0, max_relative = 1e-9);
    assert_relative_eq!(r.fracture_strain, 0.01, max_relative = 1e-9);
}

#[test]
fn test_zero_stress_curve() {
    let strain = linspace(0.0, 0.1, 50);
    let stress = vec![0.0; 50];
    let r = AnalysisEngine::default().compute(&strain, &stress);
    assert!(!r.is_fallback());
    assert_eq!(r.tensile_strength, 0.0);
    assert_eq!(r.yield_strength, 0.0);
    assert_eq!(r.toughness, 0.0);
}

#[test]
fn test_single_sample_is_degenerate_not_fallback() {
    let r = AnalysisEngine::default().compute(&[0.01], &[50.0]);
    assert!(!r.is_fallback());
    assert_eq!(r.tensile_strength, 50.0);
    assert_eq!(r.fracture_strain, 0.01);
    assert_eq!(r.yield_strength, 50.0);
    assert_eq!(r.elastic_modulus, 200.0);
    assert_eq!(r.toughness, 0.0);
}

#[test]
fn test_invalid_input_falls_back_atomically() {
    let engine = AnalysisEngine::default();
    let fallback = PropertyResult::fallback("");
    let cases: Vec<(Vec<f64>, Vec<f64>)> = vec![
        (vec![], vec![]),
        (vec![0.0, 0.1], vec![1.0]),
        (vec![0.0, f64::INFINITY], vec![1.0, 2.0]),
        (vec![0.0, 0.1], vec![f64::NAN, 2.0]),
    ];
    for (strain, stress) in cases {
        let r = engine.compute(&strain, &stress);
        assert!(r.is_fallback());
        assert_eq!(r.entries(), fallback.entries());
    }
}

#[test]
fn test_non_monotonic_strain_is_accepted() {
    let strain = vec![0.0, 0.003, 0.001, 0.005, 0.004, 0.01];
    let stress = vec![0.0, 300.0, 150.0, 350.0, 340.0, 360.0];
    let r = AnalysisEngine::default().compute(&strain, &stress);
    assert!(!r.is_fallback());
    assert_eq!(r.tensile_strength, 360.0);
    assert_eq!(r.fracture_strain, 0.01);
}

#[test]
fn test_compute_is_idempotent() {
    let engine = AnalysisEngine::default();
    let (strain, stress) = wavy_curve(120);
    assert_eq!(
        engine.compute(&strain, &stress),
        engine.compute(&strain, &stress)
    );
}

#[test]
fn test_synthetic_profiles_recover_their_modulus() {
    let engine = AnalysisEngine::default();
    for profile in [
        MaterialProfile::steel(),
        MaterialProfile::aluminum(),
        MaterialProfile::copper(),
        MaterialProfile::generic(),
    ] {
        let curve = profile.generate(200);
        let r = engine.compute_curve(&curve);
        assert!(!r.is_fallback(), "{} fell back", profile.name);
        assert_relative_eq!(r.elastic_modulus, profile.modulus / 1e3, max_relative = 1e-3);
        assert!(r.yield_strength <= r.tensile_strength);
    }
}

#[test]
fn test_offset_yield_on_bilinear_curve() {
    // offset line meets the hardening branch near strain 0.00451; the closest
    // sample is 0.0045 at 502 MPa
    let (strain, stress) = bilinear_curve();
    let engine = AnalysisEngine::new(AnalysisOptions::default().without_smoothing());
    let r = engine.compute(&strain, &stress);
    assert!(!r.is_fallback());
    assert_relative_eq!(r.elastic_modulus, 200.0, max_relative = 1e-9);
    assert_relative_eq!(r.yield_strength, 502.0, epsilon = 1e-6);
    assert_relative_eq!(r.tensile_strength, bilinear(0.02), epsilon = 1e-6);
}

#[test]
fn test_offset_yield_uses_smoothed_stress_at_closest_sample() {
    let (strain, stress) = bilinear_curve();
    let engine = AnalysisEngine::default();
    let smooth = engine.smooth(&stress).unwrap();
    let r = engine.compute(&strain, &stress);

    let slope = r.elastic_modulus * engine.options().modulus_scale;
    let offset = engine.options().offset_strain;
    let gap = |i: usize| (smooth[i] - slope * (strain[i] - offset)).abs();
    let closest = (0..strain.len())
        .filter(|&i| strain[i] > offset)
        .min_by(|&a, &b| gap(a).partial_cmp(&gap(b)).unwrap())
        .unwrap();
    assert_relative_eq!(r.yield_strength, smooth[closest], max_relative = 1e-12);
    assert!(r.yield_strength > 490.0 && r.yield_strength < 510.0);
}

#[test]
fn test_pascal_input_matches_megapascal_input() {
    let (strain, stress) = wavy_curve(120);
    let stress_pa: Vec<f64> = stress.iter().map(|s| s * 1e6).collect();
    let mpa = AnalysisEngine::default()
        .compute_curve(&SampleCurve::new(strain.clone(), stress).unwrap());
    let pa = AnalysisEngine::new(AnalysisOptions::pascal_input())
        .compute_curve(&SampleCurve::new(strain, stress_pa).unwrap());

    assert!(!pa.is_fallback());
    assert_relative_eq!(pa.elastic_modulus, mpa.elastic_modulus, max_relative = 1e-6);
    assert_relative_eq!(pa.yield_strength, mpa.yield_strength * 1e6, max_relative = 1e-6);
    assert_relative_eq!(pa.tensile_strength, mpa.tensile_strength * 1e6, max_relative = 1e-9);
    assert_eq!(pa.fracture_strain, mpa.fracture_strain);
    // Pa integral over 1e6 against MPa integral over 1e3
    assert_relative_eq!(pa.toughness, mpa.toughness * 1e3, max_relative = 1e-9);
}

#[test]
fn test_narrow_elastic_limit_falls_back_to_default_modulus() {
    let strain = linspace(0.0, 0.01, 100);
    let stress: Vec<f64> = strain.iter().map(|e| 70_000.0 * e).collect();
    let wide = AnalysisEngine::default().compute(&strain, &stress);
    assert_relative_eq!(wide.elastic_modulus, 70.0, max_relative = 1e-6);

    let narrow = AnalysisEngine::new(AnalysisOptions::default().with_elastic_limit(0.0004))
        .compute(&strain, &stress);
    assert_eq!(narrow.elastic_modulus, 200.0);
}
