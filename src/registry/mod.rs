//! Strategy ids and the providers they resolve to.
//!
//! A strategy id such as `NPlyLookahead:pliesToLookAhead=2` is the durable
//! name of a configured strategy: match specs carry ids, results are grouped
//! by them, and [`StrategyRegistry::strategy`] turns one back into a working
//! strategy.

pub mod id;
pub mod strategies;

pub use id::{decode_parameters, encode, parameters_from_id, split, ASSIGNMENT, SEPARATOR};
pub use strategies::{ProviderHandle, StrategyRegistry};
