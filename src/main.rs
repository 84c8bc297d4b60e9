// ================================
// src/main.rs
// ================================
use anyhow::Result;
use ld_distance::{Config, ForwardDistanceNode};
use log::info;
use rclrs::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load()?;
    info!("LD forward distance node");
    info!("{:#?}", config);

    let mut executor = Context::default_from_env()?.create_basic_executor();
    let node = ForwardDistanceNode::new(&executor, &config)?;

    tokio::task::block_in_place(|| executor.spin(SpinOptions::default()).first_error())?;

    let stats = node.shutdown().await?;
    info!(
        "processed {} scans, rejected {}, unclassified {}",
        stats.processed, stats.rejected, stats.invalid_distance
    );
    Ok(())
}
