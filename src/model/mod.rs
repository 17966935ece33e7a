//! Data model for the status dashboard.

mod entity;
mod period;
mod status;
mod wire;

pub use entity::*;
pub use period::*;
pub use status::*;
pub use wire::*;
