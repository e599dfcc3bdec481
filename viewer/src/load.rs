//! Single-shot asynchronous font loading.
//!
//! [`submit`] hands a byte buffer to a blocking worker and returns a
//! [`PendingLoad`] that resolves exactly once to a complete [`Font`] or an
//! error. The caller installs the result itself; nothing here touches a
//! font that is already in use.

#[cfg(test)]
#[path = "load_test.rs"]
mod load_test;

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::decode::{DecodeError, decode};
use crate::font::Font;

/// Failure of a submitted load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The worker went away without producing a result.
    #[error("font load aborted before completion")]
    Aborted,
}

/// Outcome of a load: the decoded font or why there is none.
pub type LoadResult = Result<Font, LoadError>;

/// Handle to an in-flight load.
#[derive(Debug)]
pub struct PendingLoad {
    rx: oneshot::Receiver<Result<Font, DecodeError>>,
}

impl PendingLoad {
    /// Take the result if it is ready. Returns `None` while the decode is
    /// still running.
    ///
    /// Once a result has been returned the handle is spent; later calls
    /// report [`LoadError::Aborted`].
    pub fn try_take(&mut self) -> Option<LoadResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result.map_err(LoadError::from)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(LoadError::Aborted)),
        }
    }

    /// Wait for the result.
    ///
    /// # Errors
    ///
    /// Returns the decode error, or [`LoadError::Aborted`] if the worker
    /// stopped without sending one.
    pub async fn wait(self) -> LoadResult {
        match self.rx.await {
            Ok(result) => result.map_err(LoadError::from),
            Err(_) => Err(LoadError::Aborted),
        }
    }
}

/// Start decoding `bytes`.
///
/// Inside a Tokio runtime the decode runs on the blocking pool. Outside one
/// it runs inline and the returned handle is already resolved.
#[must_use]
pub fn submit(bytes: Vec<u8>) -> PendingLoad {
    let (tx, rx) = oneshot::channel();
    let work = move || {
        if tx.send(decode(&bytes)).is_err() {
            tracing::debug!("load handle dropped before decode finished");
        }
    };
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            drop(handle.spawn_blocking(work));
        }
        Err(_) => work(),
    }
    PendingLoad { rx }
}
