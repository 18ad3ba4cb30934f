use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::assessment::AssessmentResult;

/// Identifies one form submission. Later submissions compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(u64);

/// A result that has been revealed to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Revealed {
    pub submission: SubmissionId,
    pub result: AssessmentResult,
}

struct Pending {
    id: SubmissionId,
    token: CancellationToken,
}

struct Inner {
    next_id: AtomicU64,
    active: Mutex<Option<Pending>>,
    tx: watch::Sender<Option<Revealed>>,
}

impl Inner {
    fn active(&self) -> MutexGuard<'_, Option<Pending>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish `result` if `id` is still the active submission. The check and
    /// the send happen under the same lock as `submit`, so a timer that fires
    /// after being superseded can never overwrite newer state.
    fn publish(&self, id: SubmissionId, result: AssessmentResult) {
        let mut active = self.active();
        match active.as_ref() {
            Some(pending) if pending.id == id && !pending.token.is_cancelled() => {
                *active = None;
                self.tx.send_replace(Some(Revealed {
                    submission: id,
                    result,
                }));
                debug!(submission = id.0, "revealed result");
            }
            _ => debug!(submission = id.0, "dropped stale result"),
        }
    }
}

/// Reveals assessment results after a fixed delay.
///
/// Only the most recent submission can be revealed: submitting again
/// cancels the pending reveal of the previous one.
pub struct RevealQueue {
    delay: Duration,
    inner: Arc<Inner>,
}

impl RevealQueue {
    pub fn new(delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            delay,
            inner: Arc::new(Inner {
                next_id: AtomicU64::new(1),
                active: Mutex::new(None),
                tx,
            }),
        }
    }

    /// Schedule `result` to be revealed after the delay and return its id.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, result: AssessmentResult) -> SubmissionId {
        let token = CancellationToken::new();
        let id = {
            let mut active = self.inner.active();
            let id = SubmissionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
            let superseded = active.replace(Pending {
                id,
                token: token.clone(),
            });
            if let Some(previous) = superseded {
                previous.token.cancel();
                debug!(
                    superseded = previous.id.0,
                    submission = id.0,
                    "cancelled pending reveal"
                );
            }
            id
        };

        let inner = Arc::clone(&self.inner);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => inner.publish(id, result),
            }
        });

        debug!(submission = id.0, delay_ms = delay.as_millis() as u64, "scheduled reveal");
        id
    }

    /// Cancel the pending reveal, if any. Returns true if one was cancelled.
    pub fn cancel(&self) -> bool {
        match self.inner.active().take() {
            Some(pending) => {
                pending.token.cancel();
                debug!(submission = pending.id.0, "cancelled pending reveal");
                true
            }
            None => false,
        }
    }

    /// Whether a submission is waiting to be revealed.
    pub fn is_pending(&self) -> bool {
        self.inner.active().is_some()
    }

    /// Token of submission `id` while it is still waiting to be revealed.
    fn pending_token(&self, id: SubmissionId) -> Option<CancellationToken> {
        self.inner
            .active()
            .as_ref()
            .filter(|pending| pending.id == id)
            .map(|pending| pending.token.clone())
    }

    /// The most recently revealed result.
    pub fn latest(&self) -> Option<Revealed> {
        (*self.inner.tx.borrow()).clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Revealed>> {
        self.inner.tx.subscribe()
    }

    /// Wait until submission `id` is revealed. Returns `None` if it was
    /// cancelled or superseded before its delay elapsed.
    ///
    /// Resolves as soon as `id` is superseded or cancelled, without waiting
    /// for the newer submission's delay.
    pub async fn wait_for(&self, id: SubmissionId) -> Option<AssessmentResult> {
        let mut rx = self.subscribe();
        // publish() sends before releasing the lock, so if `id` is no longer
        // pending here its result (if any) is already visible on `rx`.
        let token = self.pending_token(id);
        loop {
            if let Some(revealed) = &*rx.borrow_and_update() {
                if revealed.submission == id {
                    return Some(revealed.result.clone());
                }
            }
            let token = token.as_ref()?;
            // Cancellation happens under the lock publish() checks, so a
            // cancelled token means `id` was never revealed.
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        return None;
                    }
                }
                _ = token.cancelled() => return None,
            }
        }
    }
}

impl Drop for RevealQueue {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{Intensity, SymptomCategory, SymptomForm};
    use crate::i18n::Locale;
    use crate::scoring::Scorer;
    use tokio::time::Instant;

    const DELAY: Duration = Duration::from_millis(2000);

    fn result(level: u8) -> AssessmentResult {
        Scorer::default()
            .score_symptom_assessment(
                &SymptomForm::new(SymptomCategory::ModerateCramps, Intensity::new(level).unwrap()),
                Locale::En,
            )
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveals_after_delay() {
        let queue = RevealQueue::new(DELAY);
        let start = Instant::now();
        let id = queue.submit(result(5));
        assert!(queue.is_pending());
        assert!(queue.latest().is_none());

        let revealed = queue.wait_for(id).await;
        assert_eq!(revealed, Some(result(5)));
        assert!(start.elapsed() >= DELAY);
        assert!(!queue.is_pending());
        assert_eq!(queue.latest().map(|r| r.submission), Some(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_submission_never_reveals() {
        let queue = RevealQueue::new(DELAY);
        let first = queue.submit(result(2));
        tokio::time::sleep(DELAY / 2).await;
        let second = queue.submit(result(9));
        assert!(second > first);

        assert_eq!(queue.wait_for(first).await, None);
        assert_eq!(queue.wait_for(second).await, Some(result(9)));

        // Let the first timer's original deadline pass as well
        tokio::time::sleep(DELAY * 2).await;
        let latest = queue.latest().unwrap();
        assert_eq!(latest.submission, second);
        assert_eq!(latest.result, result(9));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submission_never_reveals() {
        let queue = RevealQueue::new(DELAY);
        let id = queue.submit(result(4));
        assert!(queue.cancel());
        assert!(!queue.is_pending());
        assert!(!queue.cancel());

        assert_eq!(queue.wait_for(id).await, None);
        tokio::time::sleep(DELAY * 2).await;
        assert!(queue.latest().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_wakes_waiter() {
        let queue = Arc::new(RevealQueue::new(DELAY));
        let id = queue.submit(result(4));
        let waiter = tokio::spawn({
            let queue = Arc::clone(&queue);
            async move { queue.wait_for(id).await }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        let start = Instant::now();
        assert!(queue.cancel());
        let revealed = tokio::time::timeout(DELAY * 30, waiter)
            .await
            .expect("waiter should resolve after cancel")
            .unwrap();
        assert_eq!(revealed, None);
        assert!(start.elapsed() < DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_supersede_wakes_waiter_immediately() {
        let queue = Arc::new(RevealQueue::new(DELAY));
        let first = queue.submit(result(2));
        let waiter = tokio::spawn({
            let queue = Arc::clone(&queue);
            async move { queue.wait_for(first).await }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        let start = Instant::now();
        let second = queue.submit(result(8));
        assert_eq!(waiter.await.unwrap(), None);
        assert!(start.elapsed() < DELAY);

        assert_eq!(queue.wait_for(second).await, Some(result(8)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_sees_only_latest() {
        let queue = RevealQueue::new(DELAY);
        let mut rx = queue.subscribe();
        queue.submit(result(1));
        let last = queue.submit(result(3));

        rx.changed().await.unwrap();
        let revealed = (*rx.borrow_and_update()).clone().unwrap();
        assert_eq!(revealed.submission, last);

        tokio::time::sleep(DELAY * 2).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resubmit_after_reveal() {
        let queue = RevealQueue::new(DELAY);
        let first = queue.submit(result(5));
        assert!(queue.wait_for(first).await.is_some());

        let second = queue.submit(result(6));
        assert_eq!(queue.wait_for(second).await, Some(result(6)));
        // An already revealed submission is no longer the latest
        assert_eq!(queue.wait_for(first).await, None);
    }
}
