// Integration tests for replaying logs through the engine

use logstep::{
    AssertionKind, Command, Engine, EngineConfig, HaltReason, Number, SessionState, SymbolTable,
    Verdict,
};

fn engine() -> Engine {
    Engine::with_config(EngineConfig {
        print_diagnostics: false,
        ..EngineConfig::default()
    })
}

/// Each log line carries one field, bound to `x`
fn bind_x(value: &i64, symbols: &mut SymbolTable) {
    symbols.set("x", *value);
}

fn verify_and_disprove(log: &[i64]) -> (Option<bool>, Option<bool>) {
    let mut engine = engine();
    assert_eq!(engine.parse_and_dispatch("verify x == 0"), Command::Verify);
    assert_eq!(engine.parse_and_dispatch("disprove x == 0"), Command::Disprove);

    let outcome = engine.replay(log.iter().copied(), bind_x);
    assert_eq!(outcome.halt, HaltReason::Exhausted);
    assert_eq!(outcome.lines_processed, log.len());

    let verdicts = engine.verdicts();
    (verdicts[0].succeeded(), verdicts[1].succeeded())
}

#[test]
fn test_verify_holds_on_every_line() {
    let (verify, disprove) = verify_and_disprove(&[0, 0, 0, 0]);
    assert_eq!(verify, Some(true));
    assert_eq!(disprove, Some(false));
}

#[test]
fn test_verify_fails_iff_disprove_succeeds() {
    for log in [&[1, 0, 0][..], &[0, 0, 7][..], &[0, 3, 0, 3][..]] {
        let (verify, disprove) = verify_and_disprove(log);
        assert_eq!(verify, Some(false), "log {:?}", log);
        assert_eq!(disprove, Some(true), "log {:?}", log);
    }
}

#[test]
fn test_first_failure_is_the_witness() {
    let mut engine = engine();
    engine.parse_and_dispatch("verify x == 0");
    engine.parse_and_dispatch("disprove x == 0");

    engine.replay([0_i64, 0, 5, 6, 0], bind_x);

    assert_eq!(
        engine.verdicts(),
        vec![Verdict::Violated { line: 2 }, Verdict::Disproved { line: 2 }]
    );
}

#[test]
fn test_break_on_halts_at_first_match() {
    let mut engine = engine();
    engine.parse_and_dispatch("break on x != 0");

    let mut seen = Vec::new();
    let log = [0_i64, 0, 0, 4, 9, 0];
    let outcome = engine.replay(log, |value, symbols| {
        seen.push(*value);
        symbols.set("x", *value);
    });

    assert_eq!(outcome.halt, HaltReason::BreakOn { line: 3 });
    assert_eq!(outcome.lines_processed, 4);
    assert_eq!(seen, vec![0, 0, 0, 4]);
    assert_eq!(engine.symbols().get("x"), Number::Int(4));
    assert_eq!(
        engine.state(),
        SessionState::Halted(HaltReason::BreakOn { line: 3 })
    );
}

#[test]
fn test_break_never_fires() {
    let mut engine = engine();
    engine.parse_and_dispatch("b x != 0");

    let outcome = engine.replay([0_i64, 0], bind_x);

    assert_eq!(outcome.halt, HaltReason::Exhausted);
    assert_eq!(engine.verdicts(), vec![Verdict::NeverBroke]);
    assert_eq!(engine.state(), SessionState::Halted(HaltReason::Exhausted));
}

#[test]
fn test_break_on_tracked_counter() {
    let mut engine = engine();
    engine.parse_and_dispatch("track (x == 1) ones += 1");
    engine.parse_and_dispatch("break on ones == 3");

    let outcome = engine.replay([1_i64, 0, 1, 1, 1, 1], bind_x);

    assert_eq!(outcome.halt, HaltReason::BreakOn { line: 3 });
    assert_eq!(engine.symbols().get("ones"), Number::Int(3));
}

#[test]
fn test_manual_driver_loop() {
    let mut engine = engine();
    engine.parse_and_dispatch("track seen += 1");
    engine.parse_and_dispatch("verify seen != 3");
    engine.parse_and_dispatch("disprove x == 0");

    let mut failures = Vec::new();
    for (i, value) in [0_i64, 0, 0, 0].iter().enumerate() {
        engine.symbols_mut().set("x", *value);
        engine.apply_one_line();
        let report = engine.check_assertions();
        assert_eq!(report.line, i);
        failures.extend(report.violations().map(|c| (report.line, c.index)));
        assert_eq!(report.counterexamples().count(), 0);
        assert!(report.checks.iter().all(|c| c.kind != AssertionKind::BreakOn));
    }

    assert_eq!(failures, vec![(2, 0)]);
    assert_eq!(
        engine.finish(),
        vec![Verdict::Violated { line: 2 }, Verdict::NotDisproved]
    );
}

#[test]
fn test_resume_after_break_and_step_back() {
    let mut engine = engine();
    engine.parse_and_dispatch("track x += 1");
    engine.parse_and_dispatch("break on x == 2");

    let outcome = engine.replay(0..10, |_, _| {});
    assert_eq!(outcome.halt, HaltReason::BreakOn { line: 1 });

    engine.apply_one_line();
    engine.check_assertions();
    assert_eq!(engine.state(), SessionState::Replaying);
    assert_eq!(engine.symbols().get("x"), Number::Int(3));

    assert_eq!(engine.step_back(), Ok(1));
    assert_eq!(engine.symbols().get("x"), Number::Int(2));
    assert_eq!(engine.verdicts(), vec![Verdict::BrokeAt { line: 1 }]);
}

#[test]
fn test_assertion_registered_mid_replay() {
    let mut engine = engine();
    engine.parse_and_dispatch("track x += 1");
    engine.apply_one_line();
    engine.check_assertions();
    engine.apply_one_line();
    engine.check_assertions();

    engine.parse_and_dispatch("verify x != 0");
    engine.apply_one_line();
    engine.check_assertions();
    assert_eq!(engine.verdicts(), vec![Verdict::Holding]);

    assert_eq!(engine.step_back(), Ok(1));
    assert_eq!(engine.verdicts(), vec![Verdict::Holding]);
    assert_eq!(engine.symbols().get("x"), Number::Int(2));
}
