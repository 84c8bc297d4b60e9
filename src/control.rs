// ================================
// src/control.rs - safe following decision
// ================================
use crate::config::Config;
use crate::error::{DistanceError, Result};
use crate::lidar::Distance;
use std::fmt;

pub const METERS_TO_FEET: f32 = 3.28084;

/// Presentation-only unit conversion; never feeds into `FollowPolicy::evaluate`.
pub fn to_feet(distance: Distance) -> f32 {
    distance * METERS_TO_FEET
}

/// Closed interval of acceptable following distances in meters.
///
/// Only constructed through `new`, so endpoints are always finite and ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeDistanceBand {
    lower: f32,
    upper: f32,
}

impl SafeDistanceBand {
    pub fn new(lower: f32, upper: f32) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(DistanceError::Config(format!(
                "invalid safe band [{lower}, {upper}]"
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.safe_lower, config.safe_upper)
    }

    pub fn lower(&self) -> f32 {
        self.lower
    }

    pub fn upper(&self) -> f32 {
        self.upper
    }

    pub fn contains(&self, distance: Distance) -> bool {
        self.lower <= distance && distance <= self.upper
    }
}

impl Default for SafeDistanceBand {
    fn default() -> Self {
        Self {
            lower: 3.0,
            upper: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    TooClose,
    TooFar,
    Hold,
}

impl fmt::Display for FollowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FollowAction::TooClose => "too_close",
            FollowAction::TooFar => "too_far",
            FollowAction::Hold => "hold",
        };
        f.write_str(name)
    }
}

/// Classifies a forward distance against the safe band.
pub struct FollowPolicy;

impl FollowPolicy {
    /// Band endpoints are inclusive. Infinite readings still compare and
    /// classify as `TooFar`/`TooClose`; only NaN is rejected.
    pub fn evaluate(distance: Distance, band: &SafeDistanceBand) -> Result<FollowAction> {
        if distance.is_nan() {
            return Err(DistanceError::InvalidDistance(distance));
        }

        let action = if distance < band.lower() {
            FollowAction::TooClose
        } else if distance > band.upper() {
            FollowAction::TooFar
        } else {
            FollowAction::Hold
        };
        Ok(action)
    }
}
