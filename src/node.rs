// ================================
// src/node.rs - ROS2 binding
// ================================
use anyhow::Result;
use log::{info, warn};
use rclrs::*;
use sensor_msgs::msg::LaserScan;
use std_msgs::msg::Float32;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    config::Config,
    error::{self, DistanceError},
    handler::ScanHandler,
    lidar::{Distance, ScanSample},
    relay::{spawn_relay, DistanceSink, RelayStats, ScanRelay},
};

/// Publishes each distance as `std_msgs/Float32`.
pub struct Float32Sink {
    publisher: Publisher<Float32>,
}

impl DistanceSink for Float32Sink {
    fn publish(&mut self, distance: Distance) -> error::Result<()> {
        let message = Float32 { data: distance };
        self.publisher
            .publish(&message)
            .map_err(|e| DistanceError::Publish(e.to_string()))
    }
}

/// Subscribes to `LaserScan`, republishes the forward distance.
///
/// Scans are queued into the relay worker; when the queue is full the newest
/// scan is dropped and logged.
pub struct ForwardDistanceNode {
    _scan_subscription: Subscription<LaserScan>,
    relay_worker: JoinHandle<(RelayStats, Float32Sink)>,
}

impl ForwardDistanceNode {
    pub fn new(executor: &Executor, config: &Config) -> Result<Self> {
        let handler = ScanHandler::from_config(config)?;
        let node = executor.create_node(config.node_name.as_str())?;

        let publisher = node.create_publisher::<Float32>(config.distance_topic.as_str())?;
        let relay = ScanRelay::new(handler, Float32Sink { publisher });
        let (tx, relay_worker) = spawn_relay(relay, config.queue_depth);

        let scan_subscription = node.create_subscription::<LaserScan, _>(
            config.scan_topic.as_str(),
            move |msg: LaserScan| Self::scan_callback(&tx, msg),
        )?;

        info!(
            "{} listening on '{}', publishing '{}'",
            config.node_name, config.scan_topic, config.distance_topic
        );

        Ok(Self {
            _scan_subscription: scan_subscription,
            relay_worker,
        })
    }

    fn scan_callback(tx: &mpsc::Sender<ScanSample>, msg: LaserScan) {
        if let Err(e) = tx.try_send(ScanSample::from(msg.ranges)) {
            warn!("Failed to queue scan message: {}", e);
        }
    }

    /// Drops the subscription, which closes the queue, and waits for the
    /// worker to drain what is left.
    pub async fn shutdown(self) -> Result<RelayStats> {
        let Self {
            _scan_subscription,
            relay_worker,
        } = self;
        drop(_scan_subscription);
        let (stats, _sink) = relay_worker.await?;
        Ok(stats)
    }
}
