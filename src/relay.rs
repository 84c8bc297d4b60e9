// ================================
// src/relay.rs - bus-side shell around ScanHandler
// ================================
use crate::{
    control::to_feet,
    error::{DistanceError, Result},
    handler::ScanHandler,
    lidar::{Distance, ScanSample},
};
use log::{debug, warn};
use tokio::{sync::mpsc, task::JoinHandle};

/// Outbound channel for extracted distances.
pub trait DistanceSink {
    fn publish(&mut self, distance: Distance) -> Result<()>;
}

impl DistanceSink for Vec<Distance> {
    fn publish(&mut self, distance: Distance) -> Result<()> {
        self.push(distance);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    /// Distances published.
    pub processed: u64,
    /// Messages dropped before publishing (bad length, publish failure).
    pub rejected: u64,
    /// Published distances the follow policy could not classify.
    pub invalid_distance: u64,
}

/// Owns the outbound sink and the message counters. The only mutable state
/// in the pipeline lives here.
pub struct ScanRelay<S: DistanceSink> {
    handler: ScanHandler,
    sink: S,
    stats: RelayStats,
}

impl<S: DistanceSink> ScanRelay<S> {
    pub fn new(handler: ScanHandler, sink: S) -> Self {
        Self {
            handler,
            sink,
            stats: RelayStats::default(),
        }
    }

    pub fn stats(&self) -> RelayStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Processes one inbound scan. Failures are logged and counted here so a bad
    /// message never stops the loop; the error is returned for callers that care.
    pub fn on_scan(&mut self, sample: &ScanSample) -> Result<()> {
        let result = self.forward(sample);
        if let Err(e) = &result {
            match e {
                DistanceError::InvalidDistance(_) => self.stats.invalid_distance += 1,
                _ => self.stats.rejected += 1,
            }
            warn!("Error during scan process: {}", e);
        }
        result
    }

    fn forward(&mut self, sample: &ScanSample) -> Result<()> {
        match self.handler.handle(sample) {
            Ok((distance, action)) => {
                self.sink.publish(distance)?;
                self.stats.processed += 1;
                match action {
                    Some(action) => debug!(
                        "forward distance {:.3} m ({:.2} ft): {}",
                        distance,
                        to_feet(distance),
                        action
                    ),
                    None => debug!("forward distance {:.3} m", distance),
                }
                Ok(())
            }
            Err(DistanceError::InvalidDistance(distance)) => {
                // Raw reading is still forwarded; only the follow decision is skipped.
                self.sink.publish(distance)?;
                self.stats.processed += 1;
                Err(DistanceError::InvalidDistance(distance))
            }
            Err(e) => Err(e),
        }
    }

    /// Drains scans in arrival order, one at a time, until every sender is dropped.
    pub async fn run(mut self, mut rx: mpsc::Receiver<ScanSample>) -> (RelayStats, S) {
        while let Some(sample) = rx.recv().await {
            // Already logged and counted; the next scan is processed regardless.
            let _ = self.on_scan(&sample);
        }
        debug!("scan channel closed: {:?}", self.stats);
        (self.stats, self.sink)
    }
}

/// Starts the relay worker on the tokio runtime and returns its inbound queue.
pub fn spawn_relay<S>(
    relay: ScanRelay<S>,
    queue_depth: usize,
) -> (mpsc::Sender<ScanSample>, JoinHandle<(RelayStats, S)>)
where
    S: DistanceSink + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<ScanSample>(queue_depth);
    let handle = tokio::spawn(relay.run(rx));
    (tx, handle)
}
