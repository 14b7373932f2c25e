//! Pipeline simulator CLI.
//!
//! A thin host driver around `rvpipe-core`: load a flat binary image at the
//! reset address, run for a cycle budget, and report the retirement trace
//! and statistics. Configuration comes from a JSON file with kebab-case
//! keys; every field has a default.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use rvpipe_core::config::Config;
use rvpipe_core::sim::loader;
use rvpipe_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "rvpipe",
    version,
    about = "Cycle-accurate 5-stage RISC-V pipeline simulator",
    long_about = "Run a flat binary image on the cycle-accurate pipeline model.\n\n\
        Examples:\n  rvpipe run -f program.bin\n  \
        rvpipe run -f program.bin --config core.json --cycles 100000 --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a flat binary image.
    Run {
        /// Binary image, loaded at the reset address.
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration file (defaults apply when omitted).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cycle budget.
        #[arg(long, default_value_t = 100_000)]
        cycles: u64,

        /// Print the retirement trace while running.
        #[arg(long)]
        trace: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            file,
            config,
            cycles,
            trace,
        } => cmd_run(&file, config.as_deref(), cycles, trace),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("[!] cannot read config '{}': {e}", path.display());
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("[!] cannot parse config '{}': {e}", path.display());
        process::exit(1);
    })
}

fn cmd_run(file: &std::path::Path, config: Option<&std::path::Path>, cycles: u64, trace: bool) {
    let config = load_config(config);

    let image = loader::read_image(file).unwrap_or_else(|e| {
        eprintln!("[!] cannot read image '{}': {e}", file.display());
        process::exit(1);
    });

    let mut sim = Simulator::with_defaults(&config).unwrap_or_else(|e| {
        eprintln!("[!] invalid configuration: {e}");
        process::exit(1);
    });
    loader::load_image(&mut sim, config.reset_addr, &image);

    for _ in 0..cycles {
        let debug = sim.tick();
        if trace && debug.pc_trigger {
            println!("{:#010x}  {:#010x}", debug.pc_trace, debug.pc_inst);
        }
    }

    println!();
    println!("retired {} instructions in {} cycles", sim.trace().len(), sim.cycle());
    sim.core.stats.print();
}
