// ================================
// src/lib.rs
// ================================
pub mod config;
pub mod control;
pub mod error;
pub mod handler;
pub mod lidar;
#[cfg(feature = "ros")]
pub mod node;
pub mod relay;

pub use config::Config;
pub use control::{to_feet, FollowAction, FollowPolicy, SafeDistanceBand};
pub use error::{DistanceError, Result};
pub use handler::ScanHandler;
pub use lidar::{forward_index, Distance, DistanceExtractor, ScanSample};
#[cfg(feature = "ros")]
pub use node::ForwardDistanceNode;
pub use relay::{spawn_relay, DistanceSink, RelayStats, ScanRelay};
