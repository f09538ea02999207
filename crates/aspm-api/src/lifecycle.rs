//! Process lifecycle: run the application task until termination is requested.
//!
//! The termination source is registered before the application task is
//! spawned, so a request arriving during startup is never lost. Cancellation
//! is cooperative; the task is never aborted from here. An entry-point error
//! is fatal and goes to the fatal handler, which by default aborts the process.

use crate::error::LifecycleError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

/// The application run under the lifecycle.
#[async_trait]
pub trait Application: Send + 'static {
    /// Name used in log output.
    const NAME: &'static str;

    /// Entry point. Should return once `cancellation` fires.
    async fn run(self, cancellation: Cancellation) -> anyhow::Result<()>;
}

/// Receiving side of a cancellation signal.
#[derive(Debug, Clone)]
pub struct Cancellation {
    rx: watch::Receiver<bool>,
}

impl Cancellation {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested or the sending side is gone.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Sending side of a cancellation signal.
#[derive(Debug)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

impl Canceller {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Create a linked canceller/cancellation pair.
pub fn cancellation() -> (Canceller, Cancellation) {
    let (tx, rx) = watch::channel(false);
    (Canceller { tx }, Cancellation { rx })
}

/// Something that resolves when the process is asked to terminate.
///
/// Dropping the source releases its registration.
#[async_trait]
pub trait TerminationSource: Send + 'static {
    async fn terminated(&mut self);
}

/// Listener for `SIGTERM`. `SIGINT` is left to the default handler.
#[derive(Debug)]
pub struct SigTerm {
    #[cfg(unix)]
    signal: tokio::signal::unix::Signal,
}

impl SigTerm {
    /// Install the listener. Must be called from within a tokio runtime.
    #[cfg(unix)]
    pub fn register() -> Result<Self, LifecycleError> {
        use tokio::signal::unix::{signal, SignalKind};
        let signal = signal(SignalKind::terminate()).map_err(LifecycleError::SignalRegistration)?;
        Ok(Self { signal })
    }

    /// No `SIGTERM` outside Unix; the returned source never fires.
    #[cfg(not(unix))]
    pub fn register() -> Result<Self, LifecycleError> {
        Ok(Self {})
    }
}

#[async_trait]
impl TerminationSource for SigTerm {
    async fn terminated(&mut self) {
        #[cfg(unix)]
        {
            if self.signal.recv().await.is_some() {
                info!("received SIGTERM");
                return;
            }
        }

        std::future::pending::<()>().await;
    }
}

type FatalHandler = Arc<dyn Fn(LifecycleError) + Send + Sync>;

fn abort_on_fatal(error: LifecycleError) {
    error!(%error, "fatal error, aborting process");
    std::process::abort();
}

/// Runs an [`Application`] until its termination source fires.
pub struct Lifecycle<S> {
    source: S,
    on_fatal: FatalHandler,
}

impl Lifecycle<SigTerm> {
    /// Lifecycle driven by `SIGTERM`.
    pub fn from_sigterm() -> Result<Self, LifecycleError> {
        Ok(Self::new(SigTerm::register()?))
    }
}

impl<S: TerminationSource> Lifecycle<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            on_fatal: Arc::new(abort_on_fatal),
        }
    }

    /// Replace the fatal handler called with [`LifecycleError::EntryPoint`].
    pub fn on_fatal<F>(mut self, handler: F) -> Self
    where
        F: Fn(LifecycleError) + Send + Sync + 'static,
    {
        self.on_fatal = Arc::new(handler);
        self
    }

    /// Spawn the application, then block until termination is requested.
    ///
    /// Returns after cancelling the application and releasing the source; it
    /// does not wait for the application task to finish.
    pub async fn run<A: Application>(self, app: A) {
        let Self { mut source, on_fatal } = self;
        let (canceller, cancellation) = cancellation();

        tokio::spawn(async move {
            if let Err(error) = app.run(cancellation).await {
                on_fatal(LifecycleError::EntryPoint(error));
            }
        });

        info!(application = A::NAME, "application started");
        source.terminated().await;
        info!(application = A::NAME, "termination requested, shutting down");

        canceller.cancel();
        drop(source);
    }
}

impl<S> fmt::Debug for Lifecycle<S>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
