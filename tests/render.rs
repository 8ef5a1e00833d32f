use rand::{rngs::StdRng, SeedableRng};

use ferrite_visu::codec::{params, state};
use ferrite_visu::render::{parameter_bounds, state_bounds};
use ferrite_visu::{
    render_parameters, render_state, BoundsMode, Hyperparameters, NormalizationBounds, ParameterModel,
    RenderConfig, RenderError, Topology,
};

const SCENARIO_B: &str = "3 2 3 1 compact 1 0 0 0.75 2 0 1 -0.9";

fn line_count(svg: &str) -> usize {
    svg.matches("<line ").count()
}

#[test]
fn scenario_b_threshold_decides_edge_count() {
    let snapshot = state::decode(SCENARIO_B, None).unwrap();

    let rendered = render_state(&snapshot, &RenderConfig::for_state()).unwrap();
    assert_eq!(rendered.edges, 2);

    let config = RenderConfig { threshold: 0.8, ..RenderConfig::for_state() };
    let rendered = render_state(&snapshot, &config).unwrap();
    assert_eq!(rendered.edges, 1);
    assert_eq!(line_count(&rendered.document), 1);
    // the -0.9 entry runs from layer 1 node 1 to layer 2 node 0
    assert!(rendered.document.contains("<line x1=\"400\" y1=\"300\" x2=\"800\" y2=\"300\""));
    assert!(rendered.document.contains("stroke:rgba(255,232,232,0.5)"));
}

#[test]
fn scenario_c_full_state_is_refused_without_output() {
    let snapshot = state::decode("3 2 3 1 full 0.1 0.2 0.3 0.4 0.5 0.6", None).unwrap();
    let err = render_state(&snapshot, &RenderConfig::for_state()).unwrap_err();
    assert_eq!(err, RenderError::UnsupportedStateFormat(ferrite_visu::StateFormat::Full));
    assert_eq!(err.to_string(), "Compact format supported only (got `full` state)");
}

#[test]
fn parameter_edges_follow_layout_and_threshold() {
    let model = params::decode("2 2 1 0.5 0.1 1.0 0.3 2.0 -1.5").unwrap();
    let rendered = render_parameters(&model, &RenderConfig::for_parameters()).unwrap();
    assert_eq!(rendered.edges, 2);
    let expected = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"600\">\n\
                    <line x1=\"0\" y1=\"0\" x2=\"800\" y2=\"300\" style=\"stroke:rgba(85,85,255,0.5);stroke-width:1\" />\n\
                    <line x1=\"0\" y1=\"600\" x2=\"800\" y2=\"300\" style=\"stroke:rgba(255,127,127,0.5);stroke-width:1\" />\n\
                    </svg>\n";
    assert_eq!(rendered.document, expected);
}

#[test]
fn values_at_the_threshold_are_not_drawn() {
    let model = params::decode("2 2 1 0.5 0.1 1.0 0.3 1.0 -1.0").unwrap();
    let rendered = render_parameters(&model, &RenderConfig::for_parameters()).unwrap();
    assert_eq!(rendered.edges, 0);
    assert_eq!(line_count(&rendered.document), 0);
    assert!(rendered.document.starts_with("<svg "));
    assert!(rendered.document.ends_with("</svg>\n"));
}

#[test]
fn raising_the_threshold_never_adds_edges() {
    let mut rng = StdRng::seed_from_u64(9);
    let topology = Topology::new(vec![6, 8, 4, 2]).unwrap();
    let model = ParameterModel::random(topology, Hyperparameters::default(), &mut rng).unwrap();

    let mut previous = usize::MAX;
    for step in 0..=10 {
        let config = RenderConfig { threshold: 0.2 + step as f64 * 0.02, ..RenderConfig::for_parameters() };
        let rendered = render_parameters(&model, &config).unwrap();
        assert_eq!(line_count(&rendered.document), rendered.edges);
        assert!(rendered.edges <= previous);
        previous = rendered.edges;
    }
    // the weights all lie in [0.2, 0.4), so the last step draws nothing
    assert_eq!(previous, 0);
}

#[test]
fn single_node_layers_render_at_mid_height() {
    let model = params::decode("3 1 1 1 0.3 0.1 -1.0 0.0 2.0 0.0 -2.0").unwrap();
    let rendered = render_parameters(&model, &RenderConfig::for_parameters()).unwrap();
    assert_eq!(rendered.edges, 2);
    assert!(rendered.document.contains("x1=\"0\" y1=\"300\" x2=\"400\" y2=\"300\""));
    assert!(rendered.document.contains("x1=\"400\" y1=\"300\" x2=\"800\" y2=\"300\""));
}

#[test]
fn compute_bounds_runs_the_pre_pass() {
    let model = params::decode("2 2 1 0.5 0.1 1.0 0.3 2.0 -1.5").unwrap();
    assert_eq!(parameter_bounds(&model), NormalizationBounds::new(-1.5, 2.0));

    let config = RenderConfig { bounds: BoundsMode::ComputeBounds, ..RenderConfig::for_parameters() };
    let rendered = render_parameters(&model, &config).unwrap();
    assert_eq!(rendered.bounds, NormalizationBounds::new(-1.5, 2.0));
    // both weights sit on their bound, so both saturate
    assert!(rendered.document.contains("rgba(0,0,255,0.5)"));
    assert!(rendered.document.contains("rgba(255,0,0,0.5)"));

    let supplied = render_parameters(&model, &RenderConfig::for_parameters()).unwrap();
    assert_eq!(supplied.bounds, NormalizationBounds::new(-3.0, 3.0));
}

#[test]
fn state_pre_pass_matches_compact_values() {
    let snapshot = state::decode(SCENARIO_B, None).unwrap();
    assert_eq!(state_bounds(&snapshot), NormalizationBounds::new(-0.9, 0.75));
}

#[test]
fn unplaceable_compact_entries_are_skipped() {
    // layer 0 has no incoming segment; j = 5 is not a node of layer 1
    let snapshot = state::decode("3 2 3 1 compact 0 1 0 0.9 2 0 5 0.9 1 2 1 0.9", None).unwrap();
    let rendered = render_state(&snapshot, &RenderConfig::for_state()).unwrap();
    assert_eq!(rendered.edges, 1);
    assert_eq!(rendered.skipped, 2);
}

#[test]
fn rendering_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(1);
    let topology = Topology::new(vec![4, 5, 3]).unwrap();
    let model = ParameterModel::random(topology, Hyperparameters::default(), &mut rng).unwrap();
    let config = RenderConfig { threshold: 0.3, ..RenderConfig::default() };
    let a = render_parameters(&model, &config).unwrap();
    let b = render_parameters(&model, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_config_fails_before_rendering() {
    let model = params::decode("2 2 1 0.5 0.1 1.0 0.3 2.0 -1.5").unwrap();
    let zero = RenderConfig { width: 0, ..RenderConfig::for_parameters() };
    assert!(matches!(render_parameters(&model, &zero), Err(RenderError::InvalidConfig(_))));
    let negative = RenderConfig { threshold: -1.0, ..RenderConfig::for_parameters() };
    assert!(matches!(render_parameters(&model, &negative), Err(RenderError::InvalidConfig(_))));
    let inverted = RenderConfig {
        bounds: BoundsMode::UseSuppliedBounds(NormalizationBounds::new(3.0, -3.0)),
        ..RenderConfig::for_parameters()
    };
    assert!(matches!(render_parameters(&model, &inverted), Err(RenderError::InvalidConfig(_))));
}

#[test]
fn render_config_json_round_trips() {
    let config = RenderConfig { width: 1024, bounds: BoundsMode::ComputeBounds, ..RenderConfig::for_state() };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<RenderConfig>(&json).unwrap(), config);
}

#[test]
fn render_config_file_round_trips() {
    let path = std::env::temp_dir().join(format!("ferrite-visu-config-{}.json", std::process::id()));
    let path = path.to_str().unwrap().to_owned();
    let config = RenderConfig { threshold: 0.5, ..RenderConfig::for_state() };
    config.save_json(&path).unwrap();
    let loaded = RenderConfig::load_json(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, config);
}
