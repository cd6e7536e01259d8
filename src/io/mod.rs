pub mod export;
pub mod receipt;

pub use export::Exporter;
pub use receipt::{render_receipt, StoreInfo};
