use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use flume::{Receiver, RecvTimeoutError, Sender};

/// Jeton d'annulation coopératif partagé entre la boucle de lecture et les
/// déclencheurs (handler SIGINT, thread clavier).
///
/// `sleep` est un `recv_timeout` sur un canal que `cancel` réveille : la
/// pause de cadence se termine dès l'annulation, sans attente active.
///
/// # Example
/// ```
/// use gr_core::cancel::CancelToken;
/// use std::time::Duration;
/// let token = CancelToken::new();
/// assert!(!token.is_cancelled());
/// token.clone().cancel();
/// assert!(token.is_cancelled());
/// assert!(token.sleep(Duration::from_secs(10)));
/// ```
#[derive(Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    wake_tx: Sender<()>,
    wake_rx: Receiver<()>,
}

impl CancelToken {
    /// Crée un jeton non annulé.
    #[must_use]
    pub fn new() -> Self {
        let (wake_tx, wake_rx) = flume::bounded(1);
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            wake_tx,
            wake_rx,
        }
    }

    /// Demande l'arrêt. Idempotent, appelable depuis n'importe quel thread.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
        // Canal plein = un réveil est déjà en attente.
        let _ = self.wake_tx.try_send(());
    }

    /// `true` une fois `cancel` appelé.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Dort au plus `duration`.
    ///
    /// Retourne `true` si le jeton est annulé (avant ou pendant l'attente).
    #[must_use]
    pub fn sleep(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        match self.wake_rx.recv_timeout(duration) {
            Ok(()) => {
                // Réarme le réveil pour les autres clones en attente.
                let _ = self.wake_tx.try_send(());
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                self.is_cancelled()
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn sleep_runs_full_duration_when_not_cancelled() {
        let token = CancelToken::new();
        let start = Instant::now();
        assert!(!token.sleep(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn cancel_wakes_a_sleeping_thread() {
        let token = CancelToken::new();
        let remote = token.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });
        let start = Instant::now();
        assert!(token.sleep(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }

    #[test]
    fn repeated_cancel_is_harmless() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.sleep(Duration::from_secs(10)));
        assert!(token.sleep(Duration::from_secs(10)));
    }
}
