use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::ApiClientError;

const PENDING: u8 = 0;
const FULFILLED: u8 = 1;
const REJECTED: u8 = 2;
const CANCELED: u8 = 3;

/// State of a [`CallHandle`]. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CallState {
    #[display("pending")]
    Pending,
    #[display("fulfilled")]
    Fulfilled,
    #[display("rejected")]
    Rejected,
    #[display("canceled")]
    Canceled,
}

impl CallState {
    fn from_u8(value: u8) -> Self {
        match value {
            FULFILLED => Self::Fulfilled,
            REJECTED => Self::Rejected,
            CANCELED => Self::Canceled,
            _ => Self::Pending,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::Pending => PENDING,
            Self::Fulfilled => FULFILLED,
            Self::Rejected => REJECTED,
            Self::Canceled => CANCELED,
        }
    }

    pub fn is_settled(self) -> bool {
        self != Self::Pending
    }
}

/// What a consumer observes when awaiting a [`CallHandle`].
#[derive(Debug)]
pub enum CallOutcome<T> {
    Fulfilled(T),
    Rejected(ApiClientError),
    Canceled,
}

impl<T> CallOutcome<T> {
    pub fn state(&self) -> CallState {
        match self {
            Self::Fulfilled(_) => CallState::Fulfilled,
            Self::Rejected(_) => CallState::Rejected,
            Self::Canceled => CallState::Canceled,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// Converts into a `Result`, cancellation becoming [`ApiClientError::Canceled`].
    pub fn into_result(self) -> Result<T, ApiClientError> {
        match self {
            Self::Fulfilled(value) => Ok(value),
            Self::Rejected(error) => Err(error),
            Self::Canceled => Err(ApiClientError::Canceled),
        }
    }
}

impl<T> From<Result<T, ApiClientError>> for CallOutcome<T> {
    fn from(result: Result<T, ApiClientError>) -> Self {
        match result {
            Ok(value) => Self::Fulfilled(value),
            Err(error) => Self::Rejected(error),
        }
    }
}

/// Single-assignment terminal state, shared by the task and every cancel handle.
#[derive(Debug, Default)]
struct Settlement(AtomicU8);

impl Settlement {
    /// Moves from `Pending` to `state`; `false` if already settled.
    fn settle(&self, state: CallState) -> bool {
        self.0
            .compare_exchange(PENDING, state.as_u8(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn state(&self) -> CallState {
        CallState::from_u8(self.0.load(Ordering::Acquire))
    }
}

/// Cancels a call from anywhere, including while its [`CallHandle`] is awaited.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
    settlement: Arc<Settlement>,
}

impl CancelHandle {
    /// Cancels the call if it is still pending.
    ///
    /// Returns `true` when this call did cancel it; canceling a settled call
    /// is a no-op.
    pub fn cancel(&self) -> bool {
        if self.settlement.settle(CallState::Canceled) {
            debug!("call canceled");
            self.token.cancel();
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> CallState {
        self.settlement.state()
    }
}

/// An in-flight call, settling exactly once.
///
/// The call runs on its own tokio task as soon as the handle is created.
/// Awaiting the handle yields a [`CallOutcome`]; use [`CallHandle::result`]
/// for a plain `Result`. Dropping the handle does not cancel the call.
///
/// ```rust,no_run
/// use beiboot_client::{ApiClient, CallOutcome};
///
/// # async fn example() -> Result<(), beiboot_client::ApiClientError> {
/// let client = ApiClient::builder().with_port(8080).build()?;
///
/// let handle = client.clusters().state("demo", None);
/// let canceler = handle.canceler();
/// tokio::spawn(async move {
///     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
///     canceler.cancel();
/// });
///
/// match handle.await {
///     CallOutcome::Fulfilled(cluster) => println!("{:?}", cluster.state),
///     CallOutcome::Rejected(error) => eprintln!("{error}"),
///     CallOutcome::Canceled => eprintln!("gave up"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CallHandle<T> {
    canceler: CancelHandle,
    receiver: oneshot::Receiver<CallOutcome<T>>,
}

impl<T> CallHandle<T>
where
    T: Send + 'static,
{
    /// Spawns `future` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, ApiClientError>> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let canceler = CancelHandle {
            token: CancellationToken::new(),
            settlement: Arc::default(),
        };

        let token = canceler.token.clone();
        let settlement = Arc::clone(&canceler.settlement);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                () = token.cancelled() => CallOutcome::Canceled,
                result = future => {
                    let outcome = CallOutcome::from(result);
                    if settlement.settle(outcome.state()) {
                        outcome
                    } else {
                        debug!("call completed after cancellation, discarding its outcome");
                        CallOutcome::Canceled
                    }
                }
            };

            if sender.send(outcome).is_err() {
                debug!("call handle dropped before completion");
            }
        });

        Self { canceler, receiver }
    }
}

impl<T> CallHandle<T> {
    /// A handle already rejected with `error`; no task is spawned.
    pub fn rejected(error: ApiClientError) -> Self {
        let (sender, receiver) = oneshot::channel();
        let settlement = Settlement::default();
        settlement.settle(CallState::Rejected);
        // the receiver is alive, sending cannot fail
        let _ = sender.send(CallOutcome::Rejected(error));

        Self {
            canceler: CancelHandle {
                token: CancellationToken::new(),
                settlement: Arc::new(settlement),
            },
            receiver,
        }
    }

    /// Cancels the call if it is still pending, see [`CancelHandle::cancel`].
    pub fn cancel(&self) -> bool {
        self.canceler.cancel()
    }

    /// A clonable handle to cancel this call from another task.
    pub fn canceler(&self) -> CancelHandle {
        self.canceler.clone()
    }

    pub fn state(&self) -> CallState {
        self.canceler.state()
    }

    /// Awaits the outcome as a `Result`.
    pub async fn result(self) -> Result<T, ApiClientError> {
        self.await.into_result()
    }
}

impl<T> Future for CallHandle<T> {
    type Output = CallOutcome<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let received = std::task::ready!(Pin::new(&mut self.receiver).poll(cx));
        let outcome = match received {
            Ok(outcome) => outcome,
            // the task vanished (panic, runtime shutdown) without sending
            Err(_) => {
                if self.canceler.settlement.settle(CallState::Rejected) {
                    CallOutcome::Rejected(ApiClientError::CallAborted)
                } else if self.canceler.state() == CallState::Canceled {
                    CallOutcome::Canceled
                } else {
                    CallOutcome::Rejected(ApiClientError::CallAborted)
                }
            }
        };
        Poll::Ready(outcome)
    }
}
