pub mod catalog;
pub mod proposals;

pub use catalog::{CatalogService, RefreshSummary};
pub use proposals::ProposalService;
