use std::future::Future;

use crate::domain::Notice;
use crate::ports::NotifierPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromiseMessages {
    pub pending: &'static str,
    pub success: &'static str,
    pub error: &'static str,
}

pub const SUBMIT_MESSAGES: PromiseMessages = PromiseMessages {
    pending: "Sending transaction",
    success: "Transaction submitted 👌",
    error: "Transaction failed 🤯",
};

/// Emits the pending notice before polling `fut`, then exactly one success or error notice.
pub async fn notify_promise<N, F, T, E>(
    notifier: &N,
    messages: PromiseMessages,
    fut: F,
) -> Result<T, E>
where
    N: NotifierPort + ?Sized,
    F: Future<Output = Result<T, E>>,
{
    notifier.notify(Notice::info(messages.pending));
    let result = fut.await;
    match &result {
        Ok(_) => notifier.notify(Notice::success(messages.success)),
        Err(_) => notifier.notify(Notice::error(messages.error)),
    }
    result
}
