use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Connect,
    ProviderAbsent,
    ConnectSucceeded,
    ConnectFailed,
    Submit,
    SubmitSucceeded,
    SubmitFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal session transition: {from:?} --{action:?}-->")]
pub struct TransitionError {
    pub from: SessionStatus,
    pub action: SessionAction,
}

/// Failure is never retained: both submit outcomes land back in `Connected`.
pub fn session_transition(
    from: SessionStatus,
    action: SessionAction,
) -> Result<(SessionStatus, &'static str), TransitionError> {
    use SessionAction as A;
    use SessionStatus as S;

    let next = match (from, action) {
        (S::Disconnected, A::Connect) => (S::Connecting, "connect_requested"),
        (S::Connecting, A::ProviderAbsent) => (S::Disconnected, "provider_absent"),
        (S::Connecting, A::ConnectFailed) => (S::Disconnected, "connect_failed"),
        (S::Connecting, A::ConnectSucceeded) => (S::Connected, "signer_bound"),
        (S::Connected, A::Submit) => (S::Submitting, "submit_requested"),
        (S::Submitting, A::SubmitSucceeded) => (S::Connected, "tx_submitted"),
        (S::Submitting, A::SubmitFailed) => (S::Connected, "tx_failed"),
        _ => return Err(TransitionError { from, action }),
    };
    Ok(next)
}
