//! Demo server: answers each request with one fragment per vowel found.

use std::{net::SocketAddr, time::Duration};

use clap::Parser;
use multigram::{DispatchOrder, MultipartServer, ServerConfig, VowelFinder};

/// Command line arguments for the demo server.
#[derive(Debug, Parser)]
#[command(name = "multigram-server", version, about = "Serve multipart vowel responses over UDP")]
struct Cli {
    /// Address to bind the server socket to.
    #[arg(long, default_value = "127.0.0.1:9999")]
    addr: SocketAddr,
    /// Delay between fragment sends, in milliseconds. Zero disables it.
    #[arg(long, default_value_t = 100)]
    fragment_delay_ms: u64,
    /// Send fragments in sequence order instead of a random permutation.
    #[arg(long)]
    sequential: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let order = if cli.sequential {
        DispatchOrder::Sequential
    } else {
        DispatchOrder::Shuffled
    };
    let delay = (cli.fragment_delay_ms > 0).then(|| Duration::from_millis(cli.fragment_delay_ms));
    let config = ServerConfig::new(cli.addr)
        .with_order(order)
        .with_fragment_delay(delay);

    let server = MultipartServer::bind(config, VowelFinder).await?;
    println!("Listening on {}", server.local_addr()?);

    let handle = server.spawn();
    tokio::signal::ctrl_c().await?;
    handle.shutdown().await?;
    Ok(())
}
