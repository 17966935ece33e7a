//! Reduction pipeline: wire timeline → buckets → uptime → entities.

mod bucket;
mod normalize;
mod uptime;

pub use bucket::*;
pub use normalize::*;
pub use uptime::*;
