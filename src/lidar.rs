// ================================
// src/lidar.rs - forward beam extraction
// ================================
use crate::config::Config;
use crate::error::{DistanceError, Result};

/// Range in meters. NaN and inf follow the sensor's no-return convention.
pub type Distance = f32;

/// One sweep of range readings, indexed from the sensor's start angle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanSample {
    ranges: Vec<f32>,
}

impl ScanSample {
    pub fn new(ranges: Vec<f32>) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &[f32] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl From<Vec<f32>> for ScanSample {
    fn from(ranges: Vec<f32>) -> Self {
        Self::new(ranges)
    }
}

/// Index of the straight-ahead beam for a scan of `scan_size` ranges.
pub const fn forward_index(scan_size: usize) -> usize {
    scan_size / 2
}

/// Picks the forward-facing range out of each scan.
#[derive(Debug, Clone, Copy)]
pub struct DistanceExtractor {
    scan_size: usize,
    forward_index: usize,
}

impl DistanceExtractor {
    pub fn new(scan_size: usize) -> Result<Self> {
        if scan_size == 0 {
            return Err(DistanceError::Config("scan_size must be positive".into()));
        }
        Ok(Self {
            scan_size,
            forward_index: forward_index(scan_size),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.scan_size)
    }

    pub fn scan_size(&self) -> usize {
        self.scan_size
    }

    pub fn forward_index(&self) -> usize {
        self.forward_index
    }

    /// Returns the raw range at the forward index.
    ///
    /// The value is not filtered: NaN or inf readings are passed through for
    /// the consumer to interpret.
    pub fn extract(&self, sample: &ScanSample) -> Result<Distance> {
        if sample.len() != self.scan_size {
            return Err(DistanceError::InvalidSampleLength {
                expected: self.scan_size,
                actual: sample.len(),
            });
        }
        Ok(sample.ranges()[self.forward_index])
    }
}
