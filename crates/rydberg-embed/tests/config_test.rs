use rydberg_embed::config::StepBudgetConfig;
use rydberg_embed::{Device, EmbeddingConfig, EmbeddingMethod, Error, ErrorKind};
use rydberg_layout::algo::blade::{RoundSchedule, StepBudget};
use rydberg_layout::lattice::LatticeKind;
use rydberg_layout::PlacementOrder;

#[test]
fn empty_json_yields_defaults() {
    let config = EmbeddingConfig::from_json_str("{}").unwrap();

    assert_eq!(config, EmbeddingConfig::default());
    assert_eq!(config.method, EmbeddingMethod::Greedy);
    assert_eq!(config.layout, LatticeKind::Triangular);
    assert_eq!(config.placement_order, PlacementOrder::Connectivity);
    assert_eq!(config.rounds, 100);
    assert_eq!(config.step_budget(), StepBudget::UNBOUNDED);
    assert!(!config.draw_steps);
    assert!(!config.allow_infeasible);
    assert!(!config.enforce_min_max_dist_ratio);
}

#[test]
fn device_dependent_defaults_resolve_from_the_device() {
    let config = EmbeddingConfig::default();

    let digital = Device::digital_analog();
    assert_eq!(config.resolved_traps(&digital, 4), 4);
    assert_eq!(config.resolved_traps(&digital, 0), digital.min_layout_traps());
    assert_eq!(config.resolved_spacing(&digital), 4.0);

    let analog = Device::analog();
    assert_eq!(config.resolved_spacing(&analog), 5.0);

    let placement = config.greedy_placement(&analog, 7);
    assert_eq!(placement.traps, 7);
    assert_eq!(placement.spacing, 5.0);
    assert_eq!(placement.lattice, LatticeKind::Triangular);
}

#[test]
fn explicit_values_win_over_device_defaults() {
    let config = EmbeddingConfig::from_json_str(
        r#"{
            "method": "greedy",
            "layout": "square",
            "traps": 10,
            "spacing": 5.0,
            "placement_order": "index"
        }"#,
    )
    .unwrap();

    let device = Device::digital_analog();
    let placement = config.greedy_placement(&device, 4);
    assert_eq!(placement.lattice, LatticeKind::Square);
    assert_eq!(placement.traps, 10);
    assert_eq!(placement.spacing, 5.0);
    assert_eq!(placement.options.order, PlacementOrder::Index);
}

#[test]
fn blade_settings_flow_into_blade_options() {
    let config = EmbeddingConfig::from_json_str(
        r#"{
            "method": "greedy-blade",
            "step_budget": {"reserved": 0.0, "grow": 2.0, "shrink": 1.0},
            "rounds": 12,
            "min_dist": 5.0,
            "max_dist": 20.0,
            "enforce_min_max_dist_ratio": true,
            "allow_infeasible": true
        }"#,
    )
    .unwrap();

    assert_eq!(config.method, EmbeddingMethod::GreedyBlade);
    let opts = config.blade_options();
    assert_eq!(
        opts.schedule,
        RoundSchedule::constant(12, (0.0, 2.0, 1.0))
    );
    assert_eq!(opts.min_dist, Some(5.0));
    assert_eq!(opts.max_dist, Some(20.0));
    assert!(opts.enforce_min_max_dist_ratio);
    assert!(opts.allow_infeasible);
}

#[test]
fn scalar_step_budget_parses() {
    let config = EmbeddingConfig::from_json_str(r#"{"step_budget": 1.5}"#).unwrap();
    assert_eq!(config.step_budget, Some(StepBudgetConfig::Scalar(1.5)));
    assert_eq!(config.step_budget(), StepBudget::Scalar(1.5));

    let config =
        EmbeddingConfig::from_json_str(r#"{"step_budget": {"grow": 3.0, "shrink": 0.5}}"#)
            .unwrap();
    assert_eq!(config.step_budget(), StepBudget::from((0.0, 3.0, 0.5)));
}

#[test]
fn unknown_names_are_configuration_errors() {
    for text in [
        r#"{"method": "dummy"}"#,
        r#"{"layout": "dummy"}"#,
        r#"{"placement_order": "dummy"}"#,
        r#"{"not_a_field": 1}"#,
        r#"{"traps": "many"}"#,
    ] {
        let err = EmbeddingConfig::from_json_str(text).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "{text}: {err}");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}

#[test]
fn method_names_parse() {
    assert_eq!("greedy".parse::<EmbeddingMethod>().unwrap(), EmbeddingMethod::Greedy);
    assert_eq!("Blade".parse::<EmbeddingMethod>().unwrap(), EmbeddingMethod::Blade);
    assert_eq!(
        "greedy_blade".parse::<EmbeddingMethod>().unwrap(),
        EmbeddingMethod::GreedyBlade
    );
    assert_eq!(EmbeddingMethod::GreedyBlade.to_string(), "greedy-blade");

    let err = "dummy".parse::<EmbeddingMethod>().unwrap_err();
    assert!(matches!(err, Error::UnknownMethod { ref name } if name == "dummy"));
}

#[test]
fn config_survives_a_json_round_trip() {
    let config = EmbeddingConfig {
        method: EmbeddingMethod::Blade,
        layout: LatticeKind::Square,
        traps: Some(12),
        step_budget: Some(StepBudgetConfig::Scalar(2.0)),
        draw_steps: true,
        ..Default::default()
    };

    let text = config.to_json_string().unwrap();
    assert!(text.contains("\"square\""));
    assert!(text.contains("\"blade\""));
    assert_eq!(EmbeddingConfig::from_json_str(&text).unwrap(), config);
}
