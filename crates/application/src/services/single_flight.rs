use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use tokio::sync::watch;

type FlightSender<T> = Arc<watch::Sender<Option<Arc<T>>>>;
pub type FlightReceiver<T> = watch::Receiver<Option<Arc<T>>>;

/// Outcome of joining a flight for a key.
pub enum FlightRole<T> {
    /// First caller for the key; must compute and `complete`.
    Leader(LeaderGuard<T>),
    /// Another caller is already computing; wait on the receiver.
    Follower(FlightReceiver<T>),
}

/// Collapses concurrent recomputations of the same key into one.
pub struct SingleFlight<T> {
    flights: Arc<DashMap<String, FlightSender<T>, FxBuildHasher>>,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SingleFlight<T> {
    pub fn new() -> Self {
        Self {
            flights: Arc::new(DashMap::with_hasher(FxBuildHasher)),
        }
    }

    pub fn join(&self, key: &str) -> FlightRole<T> {
        match self.flights.entry(key.to_string()) {
            dashmap::Entry::Occupied(e) => {
                let rx = e.get().subscribe();
                drop(e);
                FlightRole::Follower(rx)
            }
            dashmap::Entry::Vacant(e) => {
                let (tx, _rx) = watch::channel(None::<Arc<T>>);
                e.insert(Arc::new(tx));
                FlightRole::Leader(LeaderGuard {
                    flights: Arc::clone(&self.flights),
                    key: key.to_string(),
                })
            }
        }
    }

    /// Number of keys currently being computed.
    pub fn in_flight(&self) -> usize {
        self.flights.len()
    }

    /// Waits for the leader's result. `None` means the leader went away
    /// without completing; the key is free again and the caller may rejoin.
    pub async fn wait(mut rx: FlightReceiver<T>) -> Option<Arc<T>> {
        if let Some(result) = rx.borrow_and_update().clone() {
            return Some(result);
        }
        if rx.changed().await.is_ok() {
            if let Some(result) = rx.borrow().clone() {
                return Some(result);
            }
        }
        rx.borrow().clone()
    }
}

/// Held by the leader. Dropping it without `complete` releases followers
/// with `None`.
pub struct LeaderGuard<T> {
    flights: Arc<DashMap<String, FlightSender<T>, FxBuildHasher>>,
    key: String,
}

impl<T> LeaderGuard<T> {
    pub fn complete(self, result: Arc<T>) {
        if let Some((_, tx)) = self.flights.remove(&self.key) {
            let _ = tx.send(Some(result));
        }
    }
}

impl<T> Drop for LeaderGuard<T> {
    fn drop(&mut self) {
        if let Some((_, tx)) = self.flights.remove(&self.key) {
            let _ = tx.send(None);
        }
    }
}
