//! Routing engine

mod router;
mod table;

pub use router::ComplexityRouter;
pub use table::{RoutingTable, TierDefaults};
