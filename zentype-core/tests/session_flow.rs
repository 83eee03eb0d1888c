use zentype_core::history::peak;
use zentype_core::{CharacterStatus, Key, ManualClock, Status, TypingSession};

fn type_with_delay(
    session: &mut TypingSession<ManualClock>,
    clock: &ManualClock,
    string: &str,
    delay: f64,
) {
    for char in string.chars() {
        session.apply_keypress(char);
        clock.advance(delay);
    }
}

#[test]
fn complete_flow_with_mistakes_and_corrections() {
    let clock = ManualClock::new();
    let mut session = TypingSession::with_clock("hello world test", 30.0, clock.clone());

    type_with_delay(&mut session, &clock, "hello wxx", 0.25);
    assert_eq!(session.character_status(7), CharacterStatus::Error);

    // Fix "xx" -> "or"
    session.apply_backspace();
    session.apply_backspace();
    type_with_delay(&mut session, &clock, "orld test", 0.25);

    assert!(session.is_completed());
    assert_eq!(session.input_text(), "hello world test");
    assert_eq!(session.character_status(7), CharacterStatus::Correct);

    let snapshot = session.finish();
    assert_eq!(snapshot.correct_chars, 16);
    // 16 correct + 2 wrong + 2 backspaces
    assert_eq!(snapshot.total_chars_typed, 20);
    assert_eq!(snapshot.accuracy, 80.0);
    assert_eq!(snapshot.cursor, 16);
    assert_eq!(snapshot.total_chars_in_test, 16);
    assert_eq!(snapshot.duration, 30.0);

    let backspaces = session
        .keystrokes()
        .iter()
        .filter(|keystroke| keystroke.key == Key::Backspace)
        .count();
    assert_eq!(backspaces, 2);
}

#[test]
fn metrics_survive_finish() {
    let clock = ManualClock::new();
    let mut session = TypingSession::with_clock("hello world test", 30.0, clock.clone());

    type_with_delay(&mut session, &clock, "hello", 0.0);
    clock.advance(0.1);
    type_with_delay(&mut session, &clock, " woxl", 0.0);

    let wpm_before = session.wpm();
    let accuracy_before = session.accuracy();
    assert!(wpm_before > 0.0);
    assert!((accuracy_before - 90.0).abs() < 0.1);

    session.finish();

    assert_eq!(session.wpm(), wpm_before);
    assert_eq!(session.accuracy(), accuracy_before);
    assert!(!session.snapshot().wpm.is_nan());
}

#[test]
fn timed_out_session_history() {
    let clock = ManualClock::new();
    let mut session = TypingSession::with_clock("a b c d e f g h i j k l m n", 5.0, clock.clone());

    type_with_delay(&mut session, &clock, "a b c d e ", 0.5);
    assert!(session.is_completed());
    assert!(session.cursor() < session.target().len());

    let snapshot = session.finish();
    assert_eq!(snapshot.elapsed_time, 5.0);

    let history = session.wpm_history(1.0);
    assert_eq!(history.len(), 6);
    assert_eq!(history[0], 0.0);
    assert!(history.iter().all(|wpm| *wpm >= 0.0));
    assert!(peak(&history) > 0.0);

    // The log is frozen, so the series is too
    clock.advance(100.0);
    assert_eq!(session.wpm_history(1.0), history);
}

#[test]
fn retry_after_reset() {
    let clock = ManualClock::new();
    let mut session = TypingSession::with_clock("go", 30.0, clock.clone());

    type_with_delay(&mut session, &clock, "gx", 1.0);
    session.finish();
    assert_eq!(session.status(), Status::Finished);

    session.reset();
    assert_eq!(session.status(), Status::NotStarted);

    type_with_delay(&mut session, &clock, "go", 1.0);
    let snapshot = session.finish();
    assert_eq!(snapshot.accuracy, 100.0);
    assert_eq!(snapshot.elapsed_time, 2.0);
}
