//! Core types: roles, deterministic RNG, errors.
//!
//! This module contains the fundamental building blocks shared by games,
//! strategies and the match pipeline.

pub mod error;
pub mod rng;
pub mod role;

pub use error::{Error, Result};
pub use rng::GameRng;
pub use role::{Role, RoleMap};
