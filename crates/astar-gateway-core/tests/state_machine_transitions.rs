use astar_gateway_core::{session_transition, SessionAction, SessionStatus};

#[test]
fn connect_then_submit_happy_path() {
    let (s1, _) = session_transition(SessionStatus::Disconnected, SessionAction::Connect)
        .expect("disconnected -> connecting");
    assert_eq!(s1, SessionStatus::Connecting);
    let (s2, _) =
        session_transition(s1, SessionAction::ConnectSucceeded).expect("connecting -> connected");
    assert_eq!(s2, SessionStatus::Connected);
    let (s3, _) = session_transition(s2, SessionAction::Submit).expect("connected -> submitting");
    assert_eq!(s3, SessionStatus::Submitting);
    let (s4, reason) =
        session_transition(s3, SessionAction::SubmitSucceeded).expect("submitting -> connected");
    assert_eq!(s4, SessionStatus::Connected);
    assert_eq!(reason, "tx_submitted");
}

#[test]
fn failure_paths_do_not_retain_a_failed_state() {
    let (s, _) = session_transition(SessionStatus::Submitting, SessionAction::SubmitFailed)
        .expect("submitting -> connected");
    assert_eq!(s, SessionStatus::Connected);
    let (s, _) = session_transition(SessionStatus::Connecting, SessionAction::ConnectFailed)
        .expect("connecting -> disconnected");
    assert_eq!(s, SessionStatus::Disconnected);
    let (s, _) = session_transition(SessionStatus::Connecting, SessionAction::ProviderAbsent)
        .expect("connecting -> disconnected");
    assert_eq!(s, SessionStatus::Disconnected);
}

#[test]
fn submit_while_submitting_is_rejected() {
    let err = session_transition(SessionStatus::Submitting, SessionAction::Submit)
        .expect_err("must fail");
    assert!(err.to_string().contains("illegal session transition"));
}

#[test]
fn submit_before_connect_is_rejected() {
    for from in [SessionStatus::Disconnected, SessionStatus::Connecting] {
        let err = session_transition(from, SessionAction::Submit).expect_err("must fail");
        assert_eq!(err.from, from);
        assert_eq!(err.action, SessionAction::Submit);
    }
}

#[test]
fn overlapping_connect_is_rejected() {
    let err = session_transition(SessionStatus::Connecting, SessionAction::Connect)
        .expect_err("must fail");
    assert!(err.to_string().contains("Connecting"));
}
