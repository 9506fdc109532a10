use std::time::Duration;

use tokio::time::sleep;

/// Fixed pause after each call to a rate-limited provider.
///
/// Every network attempt goes through here, so switching to concurrent
/// lookups later still has to serialize on a single throttle.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_pause_waits_full_delay() {
        let throttle = Throttle::new(Duration::from_millis(1100));
        let start = Instant::now();

        throttle.pause().await;
        throttle.pause().await;

        assert!(start.elapsed() >= Duration::from_millis(2200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_is_free() {
        let start = Instant::now();
        Throttle::new(Duration::ZERO).pause().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
