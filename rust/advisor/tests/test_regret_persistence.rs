use holdem_advisor::advisor::Advisor;
use holdem_advisor::errors::AdvisorError;
use holdem_advisor::regret::RegretState;
use holdem_advisor::reward::DecisionContext;
use holdem_engine::rules::Capabilities;

fn trained_state() -> RegretState {
    let mut ctx = DecisionContext::new(Capabilities::all());
    ctx.strength = 0.37;
    ctx.pot = 333;
    ctx.to_call = 17;
    ctx.stack = 901;
    ctx.raise_amount = 77;
    ctx.player_bet = 13;
    ctx.opponents = 3;
    ctx.improvement = 0.123;
    let mut advisor = Advisor::new(2024);
    advisor.advise(&ctx, 777).unwrap();
    advisor.into_state()
}

#[test]
fn save_then_load_is_exact() {
    let state = trained_state();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regrets").join("seat0.json");
    state.save(&path).unwrap();
    let back = RegretState::load(&path).unwrap();
    assert_eq!(back, state);
    for (a, b) in back.regret_sum().iter().zip(state.regret_sum()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn file_is_a_readable_action_map() {
    let state = trained_state();
    let json = state.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for key in ["check", "call", "raise", "all-in", "fold"] {
        assert!(value["regret_sum"][key].is_number(), "missing {}", key);
        assert!(value["strategy_sum"][key].is_number(), "missing {}", key);
    }
}

#[test]
fn missing_actions_load_as_zero() {
    let state = RegretState::from_json(r#"{"regret_sum": {"raise": 4.5}}"#).unwrap();
    assert_eq!(state.regret_sum(), &[0.0, 0.0, 4.5, 0.0, 0.0]);
    assert_eq!(state.strategy_sum(), &[0.0; 5]);
}

#[test]
fn unknown_action_keys_are_rejected() {
    let err = RegretState::from_json(r#"{"regret_sum": {"limp": 1.0}}"#).unwrap_err();
    assert!(matches!(err, AdvisorError::Json(_)));
}

#[test]
fn loading_a_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RegretState::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, AdvisorError::Io(_)));
}

#[test]
fn resumed_session_continues_from_saved_regrets() {
    let state = trained_state();
    let total: f64 = state.strategy_sum().iter().sum();
    let mut advisor = Advisor::with_state(state, 1);
    let mut ctx = DecisionContext::new(Capabilities::all());
    ctx.strength = 0.5;
    ctx.pot = 10;
    advisor.advise(&ctx, 10).unwrap();
    let resumed: f64 = advisor.state().strategy_sum().iter().sum();
    assert!((resumed - total - 10.0).abs() < 1e-6);
}
