pub mod ledger;

pub use ledger::{TasteLedger, TasteSnapshot};
