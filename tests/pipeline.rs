use tensile_analyzer::prelude::*;
use tensile_analyzer::session::CurveSource;

fn csv_from(curve: &SampleCurve) -> String {
    let mut text = String::from("# exported by test rig\nStrain,Stress\n");
    for (e, s) in curve.strain().iter().zip(curve.stress()) {
        text.push_str(&format!("{},{}\n", e, s));
    }
    text
}

#[test]
fn test_uploaded_csv_matches_direct_analysis() {
    let curve = MaterialProfile::aluminum().generate_noisy(150, 2.0, 7).unwrap();
    let parsed = parse_text(&csv_from(&curve));
    assert_eq!(parsed.curve, curve);

    let engine = AnalysisEngine::default();
    assert_eq!(engine.compute_curve(&parsed.curve), engine.compute_curve(&curve));
}

#[test]
fn test_session_produces_chart_and_report() {
    let mut session = AnalysisSession::default();
    session.load_example(MaterialLabel::new("copper"));
    let output = session.analyze().unwrap();

    assert!(!output.result.is_fallback());
    let image = image::load_from_memory(&output.chart).unwrap();
    assert_eq!(image.width(), ChartOptions::default().width);
    assert_eq!(image.height(), ChartOptions::default().height);

    assert!(output.report.contains("Material: copper"));
    assert!(output.report.contains("Source file: (synthetic example)"));
    assert!(output.report.contains("Samples: 200"));
    assert!(output.report.contains("Result: computed"));
}

#[test]
fn test_sessions_are_independent() {
    let mut a = AnalysisSession::default();
    let mut b = AnalysisSession::default();
    a.load_example("steel".into());
    b.load_data("b.csv", "0,0\n0.01,50\n", "copper".into())
        .unwrap();
    a.clear();

    assert!(a.analyze().is_err());
    let out = b.analyze().unwrap();
    assert_eq!(out.result.tensile_strength, 50.0);
    assert_eq!(
        b.source(),
        Some(&CurveSource::Upload {
            filename: "b.csv".to_string()
        })
    );
}

#[test]
fn test_renderer_never_panics_on_bad_input() {
    let renderer = ChartRenderer::default();
    let placeholder = renderer.placeholder();
    let cases: Vec<(Vec<f64>, Vec<f64>)> = vec![
        (vec![], vec![]),
        (vec![0.0, 1.0, 2.0], vec![1.0]),
        (vec![0.0, f64::NAN], vec![1.0, 2.0]),
    ];
    for (strain, stress) in cases {
        let bytes = renderer.render(&strain, &stress, None, "bad");
        assert_eq!(bytes, placeholder);
    }
    let decoded = image::load_from_memory(&placeholder).unwrap();
    assert_eq!(decoded.width(), 320);
}

#[test]
fn test_render_degenerate_curves() {
    let renderer = ChartRenderer::new(ChartOptions::default().with_size(400, 300));
    let result = PropertyResult::fallback("test");
    for (strain, stress) in [
        (vec![0.01], vec![50.0]),
        (vec![0.0, 0.0, 0.0], vec![5.0, 5.0, 5.0]),
    ] {
        let bytes = renderer
            .try_render(&strain, &stress, Some(&result), "flat")
            .unwrap();
        let image = image::load_from_memory(&bytes).unwrap();
        assert_eq!((image.width(), image.height()), (400, 300));
    }
}
