use chrono::{DateTime, Utc};

/// Wall-clock source; injected so TTL expiry and trend anchoring are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
