pub mod fetch;
pub mod performance;

pub use fetch::*;
pub use performance::*;
