//! Gateway domain - request/response envelopes for the routing pipeline

mod request;
mod response;

pub use request::{RouteRequest, MAX_PROMPT_CHARS};
pub use response::{CostComparison, RouteResponse};
