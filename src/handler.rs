// ================================
// src/handler.rs - per-message pipeline
// ================================
use crate::{
    config::Config,
    control::{FollowAction, FollowPolicy, SafeDistanceBand},
    error::Result,
    lidar::{Distance, DistanceExtractor, ScanSample},
};

/// Stateless scan-to-distance pipeline. Holds only startup constants, so a
/// single instance can be shared across threads and called concurrently.
#[derive(Debug, Clone, Copy)]
pub struct ScanHandler {
    extractor: DistanceExtractor,
    band: SafeDistanceBand,
    follow_enabled: bool,
}

impl ScanHandler {
    pub fn new(
        extractor: DistanceExtractor,
        band: SafeDistanceBand,
        follow_enabled: bool,
    ) -> Self {
        Self {
            extractor,
            band,
            follow_enabled,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            DistanceExtractor::from_config(config)?,
            SafeDistanceBand::from_config(config)?,
            config.follow_enabled,
        ))
    }

    pub fn band(&self) -> &SafeDistanceBand {
        &self.band
    }

    pub fn follow_enabled(&self) -> bool {
        self.follow_enabled
    }

    /// Extracts the forward distance and, when following is enabled, classifies it.
    ///
    /// Fails with `InvalidSampleLength` for a malformed scan, and with
    /// `InvalidDistance` when following is enabled and the forward reading is NaN.
    /// The latter still carries the raw distance so the caller can forward it.
    pub fn handle(&self, sample: &ScanSample) -> Result<(Distance, Option<FollowAction>)> {
        let distance = self.extractor.extract(sample)?;

        if !self.follow_enabled {
            return Ok((distance, None));
        }

        let action = FollowPolicy::evaluate(distance, &self.band)?;
        Ok((distance, Some(action)))
    }
}
