pub mod application;
pub mod backend;
pub mod cli;
pub mod domain;
pub mod io;

pub use backend::LocalStore;
pub use domain::*;
