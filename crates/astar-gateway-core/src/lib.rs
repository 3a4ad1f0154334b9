pub mod abi;
pub mod contract;
pub mod domain;
pub mod gateway;
pub mod notify;
pub mod orchestrator;
pub mod ports;
pub mod state_machine;

pub use abi::encode_function_call;
pub use contract::{Connection, ContractBinding, ContractDetails, Signer};
pub use domain::{
    FormInput, GatewayMessage, NativeCurrency, NetworkDescriptor, Notice, NoticeLevel,
    TimestampMs, SUBMIT_MESSAGE_METHOD, UNRECOGNIZED_CHAIN_CODE,
};
pub use gateway::{
    ProviderHandle, SignIn, SwitchOutcome, WalletGateway, WALLET_MISSING_MESSAGE,
    WRONG_NETWORK_MESSAGE,
};
pub use notify::{notify_promise, PromiseMessages, SUBMIT_MESSAGES};
pub use orchestrator::{
    ConnectOutcome, FlowError, GatewayCallConfig, SessionView, SubmissionFlow, SubmitOutcome,
    CONNECT_FAILED_MESSAGE,
};
pub use ports::{ClockPort, NotifierPort, PortError, WalletTransport};
pub use state_machine::{session_transition, SessionAction, SessionStatus, TransitionError};
