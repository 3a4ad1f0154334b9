use std::sync::{Mutex, MutexGuard};

use alloy::primitives::{Address, Bytes, B256};
use thiserror::Error;

use crate::contract::{ContractBinding, ContractDetails, Connection};
use crate::domain::{FormInput, GatewayMessage, Notice};
use crate::gateway::{ProviderHandle, SwitchOutcome, WalletGateway, WRONG_NETWORK_MESSAGE};
use crate::notify::{notify_promise, SUBMIT_MESSAGES};
use crate::ports::{ClockPort, NotifierPort, PortError};
use crate::state_machine::{session_transition, SessionAction, SessionStatus, TransitionError};

pub const CONNECT_FAILED_MESSAGE: &str = "Wallet connection failed";

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("no contract binding yet; connect the wallet first")]
    NotConnected,
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("session state unavailable: {0}")]
    State(String),
}

/// Fixed arguments of the gateway's `submitMessage` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCallConfig {
    pub message_code: u64,
    pub gas_budget: u64,
    pub payload: Bytes,
}

impl Default for GatewayCallConfig {
    fn default() -> Self {
        Self {
            message_code: 5,
            gas_budget: 100_000,
            payload: Bytes::new(),
        }
    }
}

/// What the UI renders. `address` and `hash` are only ever overwritten, never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub status: SessionStatus,
    pub address: Option<Address>,
    pub hash: Option<B256>,
    pub is_loading: bool,
    pub has_contract: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected(Address),
    AlreadyConnected(Address),
    ReadOnly,
    /// The wallet is still off the target chain after the switch attempt. Nothing was
    /// recorded; connect again once the wallet has switched.
    WrongNetwork,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(B256),
    Rejected(String),
}

#[derive(Debug, Default)]
struct Session {
    view: SessionView,
    binding: Option<ContractBinding>,
}

impl Session {
    fn apply(&mut self, action: SessionAction) -> Result<(), TransitionError> {
        let (next, reason) = session_transition(self.view.status, action)?;
        tracing::debug!(from = ?self.view.status, to = ?next, reason, "session transition");
        self.view.status = next;
        Ok(())
    }
}

pub struct SubmissionFlow<N, C>
where
    N: NotifierPort,
    C: ClockPort,
{
    gateway: WalletGateway<N, C>,
    contract: ContractDetails,
    call: GatewayCallConfig,
    session: Mutex<Session>,
}

impl<N, C> SubmissionFlow<N, C>
where
    N: NotifierPort,
    C: ClockPort,
{
    pub fn new(gateway: WalletGateway<N, C>, contract: ContractDetails, call: GatewayCallConfig) -> Self {
        Self {
            gateway,
            contract,
            call,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn gateway(&self) -> &WalletGateway<N, C> {
        &self.gateway
    }

    pub fn view(&self) -> Result<SessionView, FlowError> {
        Ok(self.lock_session()?.view.clone())
    }

    pub async fn connect(&self) -> Result<ConnectOutcome, FlowError> {
        {
            let mut session = self.lock_session()?;
            if let Some(address) = session.view.address {
                return Ok(ConnectOutcome::AlreadyConnected(address));
            }
            session.apply(SessionAction::Connect)?;
        }

        let connection = match self.gateway.get_provider() {
            ProviderHandle::Present(connection) => connection,
            ProviderHandle::Absent => {
                self.lock_session()?.apply(SessionAction::ProviderAbsent)?;
                return Ok(ConnectOutcome::ReadOnly);
            }
        };

        match self.ensure_target_network(&connection).await {
            Ok(true) => {}
            Ok(false) => {
                self.lock_session()?.apply(SessionAction::ConnectFailed)?;
                return Ok(ConnectOutcome::WrongNetwork);
            }
            Err(err) => return self.fail_connect(err),
        }

        match connection.get_signer().await {
            Ok(signer) => {
                let binding = self.gateway.get_contract(&signer, &self.contract);
                let address = signer.address();
                let mut session = self.lock_session()?;
                session.view.has_contract = binding.is_some();
                session.binding = binding;
                session.view.address = Some(address);
                session.apply(SessionAction::ConnectSucceeded)?;
                tracing::info!(%address, "wallet connected");
                Ok(ConnectOutcome::Connected(address))
            }
            Err(err) => self.fail_connect(err),
        }
    }

    pub async fn submit(&self, form: FormInput) -> Result<SubmitOutcome, FlowError> {
        let binding = {
            let mut session = self.lock_session()?;
            if session.view.status == SessionStatus::Submitting {
                return Err(FlowError::SubmissionInFlight);
            }
            let binding = session.binding.clone().ok_or(FlowError::NotConnected)?;
            session.apply(SessionAction::Submit)?;
            session.view.is_loading = true;
            binding
        };
        let _loading = LoadingGuard {
            session: &self.session,
        };

        // The wallet may have moved off the target chain since connect.
        match self
            .gateway
            .is_on_right_network(binding.signer().connection())
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                self.lock_session()?.apply(SessionAction::SubmitFailed)?;
                return Ok(SubmitOutcome::Rejected(WRONG_NETWORK_MESSAGE.to_owned()));
            }
            Err(err) => {
                tracing::warn!(error = %err, "chain check before submit failed");
                self.gateway
                    .notifier()
                    .notify(Notice::error(SUBMIT_MESSAGES.error));
                self.lock_session()?.apply(SessionAction::SubmitFailed)?;
                return Ok(SubmitOutcome::Rejected(err.to_string()));
            }
        }

        let message = GatewayMessage {
            destination: form.contract,
            message_code: self.call.message_code,
            gas_budget: self.call.gas_budget,
            payload: self.call.payload.clone(),
        };
        let result = notify_promise(
            self.gateway.notifier(),
            SUBMIT_MESSAGES,
            binding.submit_message(&message),
        )
        .await;

        let mut session = self.lock_session()?;
        match result {
            Ok(hash) => {
                session.view.hash = Some(hash);
                session.apply(SessionAction::SubmitSucceeded)?;
                tracing::info!(%hash, "gateway message submitted");
                Ok(SubmitOutcome::Submitted(hash))
            }
            Err(err) => {
                tracing::warn!(error = %err, "gateway message failed");
                session.apply(SessionAction::SubmitFailed)?;
                Ok(SubmitOutcome::Rejected(err.to_string()))
            }
        }
    }

    /// `Ok(false)` when the wallet did not end up on the target chain: the switch was
    /// declined, failed, or is waiting on the detached add-chain request.
    async fn ensure_target_network(&self, connection: &Connection) -> Result<bool, PortError> {
        if self.gateway.is_on_right_network(connection).await? {
            return Ok(true);
        }
        match self.gateway.switch_network(connection).await {
            SwitchOutcome::Switched => Ok(true),
            SwitchOutcome::AddChainRequested(_) => {
                tracing::info!("chain registration requested; connect again once the wallet switched");
                Ok(false)
            }
            SwitchOutcome::Failed(err) => {
                tracing::debug!(error = %err, "wallet still on another chain");
                Ok(false)
            }
        }
    }

    fn fail_connect(&self, err: PortError) -> Result<ConnectOutcome, FlowError> {
        tracing::warn!(error = %err, "wallet connect failed");
        self.gateway
            .notifier()
            .notify(Notice::error(CONNECT_FAILED_MESSAGE));
        self.lock_session()?.apply(SessionAction::ConnectFailed)?;
        Ok(ConnectOutcome::Failed(err.to_string()))
    }

    fn lock_session(&self) -> Result<MutexGuard<'_, Session>, FlowError> {
        self.session
            .lock()
            .map_err(|e| FlowError::State(format!("session lock poisoned: {e}")))
    }
}

/// Clears the busy flag however the submission ends, including when the future is dropped.
struct LoadingGuard<'a> {
    session: &'a Mutex<Session>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut session) = self.session.lock() {
            session.view.is_loading = false;
            if session.view.status == SessionStatus::Submitting {
                session.view.status = SessionStatus::Connected;
            }
        }
    }
}
