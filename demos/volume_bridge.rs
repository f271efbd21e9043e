// ABOUTME: Volume bridge example
// ABOUTME: Listens for external volume pushes, optionally pulls once and pushes a value

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use volume_link::{Endpoint, VolumeClient, VolumeConfig, VolumeListener};

/// Sync player volume with an external volume controller
#[derive(Parser, Debug)]
#[command(name = "volume_bridge")]
#[command(about = "Exchange volume with an external controller over TCP", long_about = None)]
struct Args {
    /// JSON config file with `client` and `listener` sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Controller address to pull from and push to
    #[arg(long, default_value = "127.0.0.1:8001")]
    peer: String,

    /// Local port to accept pushed updates on
    #[arg(long, default_value_t = 8002)]
    listen_port: u16,

    /// Internal volume (0-65535) to push once at startup
    #[arg(long)]
    push: Option<u32>,

    /// Timeout for each exchange in milliseconds
    #[arg(long, default_value_t = 500)]
    timeout_ms: u64,
}

fn endpoints(args: &Args) -> Result<VolumeConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &args.config {
        return Ok(VolumeConfig::from_file(path)?);
    }

    let (host, port) = args
        .peer
        .rsplit_once(':')
        .ok_or("peer must be host:port")?;

    Ok(VolumeConfig {
        client: Endpoint::new(true, host.trim_matches(['[', ']']), port.parse()?),
        listener: Endpoint::new(true, "0.0.0.0", args.listen_port),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = endpoints(&args)?;
    let timeout = Duration::from_millis(args.timeout_ms);

    let client = VolumeClient::new(config.client);
    let listener = VolumeListener::new(config.listener);
    listener.start();

    match client.get_volume(timeout).await {
        Some(volume) => println!("Controller volume: {}", volume),
        None => println!("Controller volume unknown"),
    }

    if let Some(volume) = args.push {
        client.set_volume(volume, timeout);
        println!("Pushed volume {}", volume);
    }

    if !listener.is_enabled() {
        return Ok(());
    }

    println!("Waiting for external volume updates (Ctrl+C to quit)...");
    loop {
        tokio::select! {
            volume = listener.recv() => println!("External volume update: {}", volume),
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
