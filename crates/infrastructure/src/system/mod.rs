pub mod clock;
pub mod random;

pub use clock::SystemClock;
pub use random::SeededRandom;
