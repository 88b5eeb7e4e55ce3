//! Runs a straight pipe line fed by a puller and prints where the items ended up.
//!
//! ```text
//! [source chest]-[puller]-[seg]...[seg]-[sink chest]
//!                                  |
//!                            [side chest]   (with --junction)
//! ```

use std::path::PathBuf;

use clap::Parser;
use pipe_logistics::{BlockPos, Face, Inventory, PipeConfig, PipeNetwork, PipeTier, Role, Stack};
use pipe_logistics::{ItemStorage, SyncMessage};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(about = "Simulate a pipe line between two chests")]
struct Args {
    /// Number of transport segments after the puller
    #[arg(long, default_value_t = 4)]
    length: i32,
    /// Pipe tier id (0 basic, 1 improved, 2 advanced, 3 elite)
    #[arg(long, default_value_t = 1)]
    tier: u8,
    /// Ticks to simulate
    #[arg(long, default_value_t = 400)]
    ticks: u32,
    /// Items placed in the source chest
    #[arg(long, default_value_t = 64)]
    items: u16,
    /// Add a side chest below the middle segment
    #[arg(long)]
    junction: bool,
    /// TOML file with pipe configuration overrides
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,pipe_logistics=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => PipeConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => PipeConfig::default(),
    };
    let tier = PipeTier::from_id(args.tier)?;
    let at = |x: i32| BlockPos::new(x, 0, 0);

    let mut net = PipeNetwork::new(config, Role::Authoritative)?;
    let mut source = Inventory::new(1, args.items.max(1));
    source.set_slot(0, Some(Stack::new(1, args.items.max(1))));
    net.place_storage(at(-1), source)?;
    net.place_extraction_segment(at(0), tier)?;
    for x in 1..=args.length {
        net.place_segment(at(x), tier)?;
    }
    let sink = at(args.length + 1);
    net.place_storage(sink, Inventory::new(9, 64))?;
    let side = at(args.length / 2 + 1).offset(Face::Down);
    if args.junction {
        net.place_storage(side, Inventory::new(9, 64))?;
    }

    tracing::info!(
        "simulating {} ticks on a {:?} line of {} segments",
        args.ticks,
        tier,
        args.length
    );

    let mut messages: Vec<SyncMessage> = Vec::new();
    let mut delivered = 0;
    for _ in 0..args.ticks {
        net.tick(&mut messages);
        let now = net.storage(sink).map_or(0, |chest| chest.count_of(1));
        if now != delivered {
            tracing::info!("tick {}: {} items delivered", net.tick_count(), now);
            delivered = now;
        }
    }

    tracing::info!(
        "done: {} left in source, {} in transit, {} in sink, {} sync messages",
        net.storage(at(-1)).map_or(0, |chest| chest.count_of(1)),
        net.count_in_transit(1),
        delivered,
        messages.len()
    );
    if args.junction {
        tracing::info!(
            "{} items took the side exit",
            net.storage(side).map_or(0, |chest| chest.count_of(1))
        );
    }
    Ok(())
}
