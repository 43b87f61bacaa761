//! Pacing — the simulated-latency seam.
//!
//! Scripts never call `tokio::time::sleep` directly; they pause through a
//! [`Pacer`]. Production uses [`WallClockPacer`] (real sleeps with a little
//! jitter so the typing rhythm doesn't feel metronomic). Tests use
//! [`InstantPacer`], which returns immediately and records what was
//! requested, so a whole journey fast-forwards deterministically.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

/// Delay seam between scripted message appends.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// Real delays on the tokio timer, jittered ±20%.
pub struct WallClockPacer;

#[async_trait]
impl Pacer for WallClockPacer {
    async fn pause(&self, delay: Duration) {
        let factor: f64 = rand::thread_rng().gen_range(0.8..1.2);
        tokio::time::sleep(delay.mul_f64(factor)).await;
    }
}

/// No-op pacer that records every requested pause.
#[derive(Default)]
pub struct InstantPacer {
    recorded: Mutex<Vec<Duration>>,
}

impl InstantPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pause requested so far, in order.
    pub fn recorded(&self) -> Vec<Duration> {
        self.recorded.lock().expect("pacer lock poisoned").clone()
    }

    /// Sum of all requested pauses — the wall-clock time the script would
    /// have taken.
    pub fn total(&self) -> Duration {
        self.recorded().iter().sum()
    }
}

#[async_trait]
impl Pacer for InstantPacer {
    async fn pause(&self, delay: Duration) {
        self.recorded.lock().expect("pacer lock poisoned").push(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn instant_pacer_records_in_order() {
        let pacer = InstantPacer::new();
        pacer.pause(Duration::from_millis(400)).await;
        pacer.pause(Duration::from_millis(800)).await;
        assert_eq!(
            pacer.recorded(),
            vec![Duration::from_millis(400), Duration::from_millis(800)]
        );
        assert_eq!(pacer.total(), Duration::from_millis(1200));
    }

    #[tokio::test]
    async fn instant_pacer_does_not_block() {
        let pacer = InstantPacer::new();
        let started = std::time::Instant::now();
        for _ in 0..100 {
            pacer.pause(Duration::from_secs(10)).await;
        }
        // 1000 simulated seconds, essentially zero real time
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(pacer.total(), Duration::from_secs(1000));
    }
}
