use ecostats_application::ports::RandomSource;
use std::sync::Mutex;

/// `fastrand` generator behind a mutex so it can be shared as a port.
pub struct SeededRandom {
    rng: Mutex<fastrand::Rng>,
}

impl SeededRandom {
    /// Non-deterministic seed.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&self) -> f64 {
        self.rng.lock().unwrap_or_else(|e| e.into_inner()).f64()
    }

    fn range_u64(&self, low: u64, high: u64) -> u64 {
        if high < low {
            return low;
        }
        self.rng
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .u64(low..=high)
    }
}
