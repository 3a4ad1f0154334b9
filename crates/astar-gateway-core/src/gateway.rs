use std::sync::Arc;

use alloy::primitives::Address;
use chrono::{DateTime, Local};
use tokio::task::JoinHandle;

use crate::contract::{Connection, ContractBinding, ContractDetails, Signer};
use crate::domain::{NetworkDescriptor, Notice, UNRECOGNIZED_CHAIN_CODE};
use crate::ports::{ClockPort, NotifierPort, PortError, WalletTransport};

pub const WALLET_MISSING_MESSAGE: &str = "MetaMask is not installed! Running as READ-ONLY mode.";
pub const WRONG_NETWORK_MESSAGE: &str = "Please switch to the right network!";

#[derive(Debug, Clone)]
pub enum ProviderHandle {
    Present(Connection),
    Absent,
}

impl ProviderHandle {
    pub fn connection(&self) -> Option<&Connection> {
        match self {
            Self::Present(connection) => Some(connection),
            Self::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Result of asking the wallet to switch chains. The add-chain follow-up runs detached;
/// the handle is only useful to callers that want to observe it (tests).
#[derive(Debug)]
pub enum SwitchOutcome {
    Switched,
    AddChainRequested(JoinHandle<()>),
    Failed(PortError),
}

#[derive(Debug, Clone)]
pub struct SignIn {
    pub signer: Signer,
    pub address: Address,
}

pub struct WalletGateway<N, C>
where
    N: NotifierPort,
    C: ClockPort,
{
    network: NetworkDescriptor,
    injected: Option<Arc<dyn WalletTransport>>,
    notifier: N,
    clock: C,
}

impl<N, C> WalletGateway<N, C>
where
    N: NotifierPort,
    C: ClockPort,
{
    pub fn new(
        network: NetworkDescriptor,
        injected: Option<Arc<dyn WalletTransport>>,
        notifier: N,
        clock: C,
    ) -> Self {
        Self {
            network,
            injected,
            notifier,
            clock,
        }
    }

    pub fn network(&self) -> &NetworkDescriptor {
        &self.network
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn get_provider(&self) -> ProviderHandle {
        match &self.injected {
            Some(transport) => ProviderHandle::Present(Connection::new(Arc::clone(transport))),
            None => {
                tracing::warn!("no wallet capability injected; read-only mode");
                self.notifier.notify(Notice::error(WALLET_MISSING_MESSAGE));
                ProviderHandle::Absent
            }
        }
    }

    pub async fn is_on_right_network(&self, connection: &Connection) -> Result<bool, PortError> {
        let current = connection.chain_id().await?;
        let expected = self.network.chain_id_hex();
        if current.as_str() != Some(expected.as_str()) {
            tracing::warn!(%current, %expected, "wallet on unexpected chain");
            self.notifier.notify(Notice::warning(WRONG_NETWORK_MESSAGE));
            return Ok(false);
        }
        Ok(true)
    }

    /// Never fails the caller. An unrecognized chain schedules one detached
    /// `wallet_addEthereumChain`; the user retries connect afterwards.
    pub async fn switch_network(&self, connection: &Connection) -> SwitchOutcome {
        let result = connection
            .send(
                "wallet_switchEthereumChain",
                self.network.switch_chain_params(),
            )
            .await;
        match result {
            Ok(_) => SwitchOutcome::Switched,
            Err(err) if err.rpc_code() == Some(UNRECOGNIZED_CHAIN_CODE) => {
                tracing::info!(chain = %self.network.chain_name, "chain unknown to wallet; requesting add");
                let connection = connection.clone();
                let params = self.network.add_chain_params();
                let handle = tokio::spawn(async move {
                    if let Err(e) = connection.send("wallet_addEthereumChain", params).await {
                        tracing::warn!(error = %e, "wallet_addEthereumChain failed");
                    }
                });
                SwitchOutcome::AddChainRequested(handle)
            }
            Err(err) => {
                tracing::warn!(error = %err, "wallet_switchEthereumChain failed");
                SwitchOutcome::Failed(err)
            }
        }
    }

    pub async fn perform_sign_in(&self, connection: &Connection) -> Result<SignIn, PortError> {
        let signer = connection.get_signer().await?;
        let address = signer.address();
        let issued_at = self.issued_at()?;
        let message = sign_in_message(address, &self.network.chain_id_hex(), &issued_at);
        signer.personal_sign(&message).await?;
        Ok(SignIn { signer, address })
    }

    pub fn get_contract(&self, signer: &Signer, details: &ContractDetails) -> Option<ContractBinding> {
        details
            .address
            .map(|address| ContractBinding::new(address, Arc::clone(&details.abi), signer.clone()))
    }

    fn issued_at(&self) -> Result<String, PortError> {
        let now_ms = self.clock.now_ms()?;
        let now_ms = i64::try_from(now_ms)
            .map_err(|e| PortError::Validation(format!("timestamp out of range: {e}")))?;
        let utc = DateTime::from_timestamp_millis(now_ms)
            .ok_or_else(|| PortError::Validation(format!("invalid timestamp: {now_ms}")))?;
        Ok(utc
            .with_timezone(&Local)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string())
    }
}

pub fn sign_in_message(address: Address, chain_id_hex: &str, issued_at: &str) -> String {
    format!(
        "I hereby confirm I am the owner of address {address} and accept the ToS for IU-VerCert!\n\nChain ID: {chain_id_hex}\n\nIssued At: {issued_at}."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_message_embeds_address_chain_and_time() {
        let address: Address = "0x1000000000000000000000000000000000000001"
            .parse()
            .expect("address");
        let msg = sign_in_message(address, "0x51", "1/2/2026, 3:04:05 PM");
        assert!(msg.starts_with(
            "I hereby confirm I am the owner of address 0x1000000000000000000000000000000000000001"
        ));
        assert!(msg.contains("\n\nChain ID: 0x51\n\n"));
        assert!(msg.ends_with("Issued At: 1/2/2026, 3:04:05 PM."));
    }
}
