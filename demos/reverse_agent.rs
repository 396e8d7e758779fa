//! Agent that answers every peer with its message reversed.
//!
//! Reads `HASHGRID_API_KEY` (and optionally `HASHGRID_BASE_URL`) from the
//! environment, then handles each new tick until Ctrl-C.
//!
//! Run with: RUST_LOG=hashgrid=info cargo run --example reverse_agent

use futures::StreamExt;
use hashgrid::{clamp_score, statuses_by_peer, ClientConfig, Hashgrid, Message};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,hashgrid=info")),
        )
        .init();

    let config = ClientConfig::from_env()?;
    if config.api_key.is_none() {
        anyhow::bail!("HASHGRID_API_KEY is not set");
    }
    let poll_interval = config.poll_interval;

    let mut grid = Hashgrid::connect(config).await?;
    let client = grid.client().clone();
    let _session = client.session()?;

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let nodes_view = grid.clone();
    let mut ticks = grid.listen_until(poll_interval, cancel);
    while let Some(tick) = ticks.next().await {
        println!("tick {}", tick);
        let mut nodes = nodes_view.nodes();
        while let Some(node) = nodes.next().await {
            let node = match node {
                Ok(node) => node,
                Err(e) => {
                    eprintln!("could not list nodes: {}", e);
                    break;
                }
            };

            let messages = match node.recv().await {
                Ok(messages) => messages,
                Err(e) => {
                    eprintln!("recv failed for {}: {}", node.name(), e);
                    continue;
                }
            };
            if messages.is_empty() {
                continue;
            }

            let replies: Vec<Message> = messages
                .iter()
                .map(|m| {
                    m.reply(m.message.chars().rev().collect::<String>())
                        .with_score(clamp_score(0.9))
                })
                .collect();

            match node.send(&replies).await {
                Ok(statuses) => {
                    let by_peer = statuses_by_peer(&statuses);
                    for reply in &replies {
                        let delivered = by_peer.get(reply.peer_id.as_str()).copied().unwrap_or(false);
                        println!("  {} -> {}: delivered={}", node.name(), reply.peer_id, delivered);
                    }
                }
                Err(e) => eprintln!("send failed for {}: {}", node.name(), e),
            }
        }
    }

    println!("stopped");
    Ok(())
}
