use crate::domain::ports::CancelSignal;
use crate::utils::error::{BundlerError, Result};
use std::future::Future;
use tokio::sync::watch;

/// Creates a cancel flag that starts out unset.
pub fn cancel_pair() -> (watch::Sender<bool>, CancelSignal) {
    watch::channel(false)
}

pub fn is_cancelled(signal: &CancelSignal) -> bool {
    *signal.borrow()
}

/// Resolves once the flag is set. A dropped sender never cancels.
pub async fn cancelled(signal: &CancelSignal) {
    let mut signal = signal.clone();
    let sender_dropped = signal.wait_for(|cancelled| *cancelled).await.is_err();
    if sender_dropped {
        std::future::pending::<()>().await;
    }
}

/// Runs `fut` unless the flag is set first.
pub async fn run_cancellable<F, T>(signal: &CancelSignal, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancelled(signal) => Err(BundlerError::Cancelled),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_runs_to_completion_when_not_cancelled() {
        let (_tx, rx) = cancel_pair();

        let result = run_cancellable(&rx, async { Ok(5) }).await;

        assert_eq!(result.unwrap(), 5);
        assert!(!is_cancelled(&rx));
    }

    #[tokio::test]
    async fn test_already_cancelled_short_circuits() {
        let (tx, rx) = cancel_pair();
        tx.send(true).unwrap();

        let result: Result<()> = run_cancellable(&rx, async { Ok(()) }).await;

        assert!(matches!(result, Err(BundlerError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_during_pending_work() {
        let (tx, rx) = cancel_pair();

        let handle = tokio::spawn(async move {
            run_cancellable(&rx, async {
                std::future::pending::<()>().await;
                Ok(())
            })
            .await
        });
        tx.send(true).unwrap();

        let result = handle.await.unwrap();
        assert!(matches!(result, Err(BundlerError::Cancelled)));
    }

    #[tokio::test]
    async fn test_dropped_sender_does_not_cancel() {
        let (tx, rx) = cancel_pair();
        drop(tx);

        let result = run_cancellable(&rx, async { Ok("done") }).await;

        assert_eq!(result.unwrap(), "done");
    }
}
