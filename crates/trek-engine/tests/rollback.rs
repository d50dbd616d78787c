//! Integration test: a failed tick leaves the previous generation published.

use std::error::Error;

use trek_core::{CellId, TickId};
use trek_engine::{EnginePhase, SimulationConfig, StepEngine, StepError};
use trek_test_utils::fixtures::{ConservingModel, FailAtCell, FailingModel};
use trek_test_utils::{assert_mass, straight_trail};
use trek_trail::TrailError;

#[test]
fn failure_mid_tick_keeps_previous_population() {
    // One expansion on tick 1, two on tick 2: the second call fails.
    let config = SimulationConfig::new(straight_trail(6)).with_model(FailingModel::new(1));
    let mut engine = StepEngine::new(config).unwrap();

    engine.step().unwrap();
    let published = engine.population().clone();
    let metrics = engine.last_metrics().clone();

    let err = engine.step().unwrap_err();
    match &err {
        StepError::ExpansionFailed { model, reason, .. } => {
            assert_eq!(model, "failing");
            assert!(matches!(reason, TrailError::CellNotFound { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.source().is_some());

    assert_eq!(engine.population(), &published);
    assert_eq!(engine.current_tick(), TickId(1));
    assert_eq!(engine.last_metrics(), &metrics);
    assert_eq!(engine.phase(), EnginePhase::Idle);
}

#[test]
fn failure_is_repeatable_and_reset_recovers() {
    let config = SimulationConfig::new(straight_trail(6)).with_model(FailAtCell::new(CellId(3)));
    let mut engine = StepEngine::new(config).unwrap();

    // Mass first reaches cell 3 on tick 3, so tick 4 fails.
    assert_eq!(engine.run(3).unwrap(), TickId(3));
    let published = engine.population().clone();
    for _ in 0..3 {
        assert!(engine.step().is_err());
        assert_eq!(engine.current_tick(), TickId(3));
        assert_eq!(engine.population(), &published);
    }

    engine.reset();
    assert_eq!(engine.current_tick(), TickId(0));
    assert!(engine.step().is_ok());
}

#[test]
fn run_stops_at_first_failure() {
    let config = SimulationConfig::new(straight_trail(6)).with_model(FailAtCell::new(CellId(2)));
    let mut engine = StepEngine::new(config).unwrap();
    assert!(engine.run(10).is_err());
    assert_eq!(engine.current_tick(), TickId(2));
}

#[test]
fn conserving_model_keeps_total_mass() {
    let config = SimulationConfig::new(straight_trail(4)).with_model(ConservingModel);
    let mut engine = StepEngine::new(config).unwrap();
    engine.run(25).unwrap();
    assert_mass(engine.population().total_mass(), 1.0);
    assert_eq!(engine.model_name(), "conserving");
}
