pub mod hubs;
pub mod ranker;
pub mod direct;
pub mod creative;
pub mod comparison;
pub mod engine;

#[cfg(test)]
pub(crate) mod testing;

pub use comparison::compare;
pub use creative::CreativeRouteAssembler;
pub use direct::DirectSearch;
pub use engine::{EngineConfig, FlightSearchEngine};
pub use hubs::relevant_hubs;
pub use ranker::dedupe_and_rank;
