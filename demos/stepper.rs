//! Animate a BFS/DFS search in the terminal, one expansion per tick.
//!
//! Run: cargo run --bin stepper -- --topology HEX_6 --strategy DFS --walls 0.25
//! Set RUST_LOG=debug to see engine events on stderr.

use std::error::Error;
use std::io;
use std::thread;

use clap::Parser;
use rand::SeedableRng;
use tilepath_demos::{draw, scatter_walls, summary};
use tilepath_search::{SearchConfig, Strategy, Topology};

#[derive(Parser, Debug)]
#[command(name = "stepper", about = "Step through a grid search in the terminal")]
struct Args {
    /// Grid width in tiles.
    #[arg(long, default_value_t = 20)]
    width: i32,
    /// Grid height in tiles.
    #[arg(long, default_value_t = 20)]
    height: i32,
    /// SQUARE_4, SQUARE_8 or HEX_6.
    #[arg(long, default_value = "SQUARE_8")]
    topology: Topology,
    /// BFS or DFS.
    #[arg(long, default_value = "BFS")]
    strategy: Strategy,
    /// Milliseconds between steps.
    #[arg(long, default_value_t = 50)]
    interval_ms: u64,
    /// Fraction of tiles to block at random.
    #[arg(long, default_value_t = 0.0)]
    walls: f64,
    /// Seed for wall placement.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Skip the animation and only draw the final state.
    #[arg(long)]
    instant: bool,
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let cfg = SearchConfig::default()
        .with_size(args.width, args.height)
        .with_topology(args.topology)
        .with_strategy(args.strategy)
        .with_step_interval_ms(args.interval_ms);

    let mut grid = cfg.build_grid()?;
    let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);
    scatter_walls(&mut grid, args.walls, &mut rng, &[cfg.start, cfg.goal()]);

    let mut engine = cfg.engine_for(grid)?;
    let mut out = io::stdout();
    while engine.step()? {
        if !args.instant {
            draw(&mut out, &engine)?;
            thread::sleep(cfg.step_interval());
        }
    }
    draw(&mut out, &engine)?;
    println!("{}", summary(&engine));
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
