//! Demo client: sends one request and prints the reassembled fragments.

use std::{net::SocketAddr, time::Duration};

use clap::Parser;
use multigram::{ClientConfig, MultipartClient};

/// Command line arguments for the demo client.
#[derive(Debug, Parser)]
#[command(name = "multigram-client", version, about = "Send a multipart request over UDP")]
struct Cli {
    /// Server address to send the request to.
    #[arg(long, default_value = "127.0.0.1:9999")]
    addr: SocketAddr,
    /// Message to send.
    #[arg(long, default_value = "Hello, please find my vowels!")]
    message: String,
    /// Request timeout in seconds. Zero waits forever.
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let timeout = (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs));
    let config = ClientConfig::new(cli.addr).with_request_timeout(timeout);
    let client = MultipartClient::connect(config).await?;

    let fragments = client.request(&cli.message).await?;
    for fragment in &fragments {
        println!("{fragment}");
    }

    client.shutdown().await;
    Ok(())
}
