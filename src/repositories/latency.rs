use std::time::Duration;

/// Artificial delay applied before every repository call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub read: Duration,
    pub write: Duration,
}

impl SimulatedLatency {
    pub fn new(read: Duration, write: Duration) -> Self {
        Self { read, write }
    }

    pub fn from_millis(read_ms: u64, write_ms: u64) -> Self {
        Self::new(Duration::from_millis(read_ms), Duration::from_millis(write_ms))
    }

    /// No delay at all; used by tests.
    pub fn none() -> Self {
        Self::default()
    }

    pub async fn before_read(&self) {
        pause(self.read).await;
    }

    pub async fn before_write(&self) {
        pause(self.write).await;
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
