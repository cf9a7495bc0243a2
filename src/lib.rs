//! tilemove: AABB movement and collision for tile/pixel games (blocks, ramps,
//! one-way platforms, elevators)

pub mod types;
pub mod api;
pub mod error;
pub mod config;
pub mod block;
pub mod ramp;
pub mod narrowphase;
pub mod mover;
pub mod elevator;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::error::{PhysicsError, Result};
pub use crate::config::PhysicsConfig;
pub use crate::block::Block;
pub use crate::ramp::Ramp;
pub use crate::mover::Mover;
