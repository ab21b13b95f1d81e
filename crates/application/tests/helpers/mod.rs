pub mod builders;
pub mod mocks;

pub use builders::*;
pub use mocks::*;
