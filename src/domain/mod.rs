mod bill;
mod customer;
mod ledger;
mod money;
mod product;
mod sale;

pub use bill::*;
pub use customer::*;
pub use ledger::*;
pub use money::*;
pub use product::*;
pub use sale::*;
