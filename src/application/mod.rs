// Application layer - the desks orchestrating domain state and the
// backend collaborators.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
