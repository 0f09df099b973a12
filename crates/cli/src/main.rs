//! RISC-V hart model CLI.
//!
//! This binary inspects hart models without an execution engine. It performs:
//! 1. **Models:** Lists the named hart models.
//! 2. **ISA:** Realizes one hart and prints its ISA string.
//! 3. **Dump:** Prints the register dump, optionally after restoring a checkpoint.
//! 4. **Save:** Writes the reset-state checkpoint of a hart.
//! 5. **Trap:** Names a trap cause.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rvhart_core::common::HartError;
use rvhart_core::config::{Config, HartModel};
use rvhart_core::core::arch::trap::trap_name;
use rvhart_core::core::dump::HartDump;
use rvhart_core::core::{Hart, NullEngine};

#[derive(Parser, Debug)]
#[command(
    name = "rvhart",
    author,
    version,
    about = "RISC-V hart model inspector",
    long_about = "Resolve hart models, print register dumps and write or restore checkpoints.\n\nExamples:\n  rvhart models\n  rvhart isa --model sifive-u54\n  rvhart save --model rv32 --out hart0.snap\n  rvhart dump --restore hart0.snap --fpu\n  rvhart trap 13"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Hart selection shared by the subcommands that build a hart.
#[derive(clap::Args, Debug)]
struct HartArgs {
    /// Hart model; overrides the model named in the configuration file.
    #[arg(short, long)]
    model: Option<HartModel>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List hart models.
    Models,

    /// Print the ISA string of a realized hart.
    Isa {
        #[command(flatten)]
        hart: HartArgs,
    },

    /// Print the register dump of a hart.
    Dump {
        #[command(flatten)]
        hart: HartArgs,

        /// Checkpoint to restore before dumping.
        #[arg(long)]
        restore: Option<PathBuf>,

        /// Include floating-point registers.
        #[arg(long)]
        fpu: bool,
    },

    /// Write the reset-state checkpoint of a hart.
    Save {
        #[command(flatten)]
        hart: HartArgs,

        /// Output file.
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Print the name of a trap cause.
    Trap {
        /// Cause code, without the interrupt bit.
        cause: u64,

        /// Treat the cause as an interrupt.
        #[arg(long)]
        interrupt: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), HartError> {
    match command {
        Commands::Models => {
            for name in HartModel::names() {
                println!("{name}");
            }
        }
        Commands::Isa { hart } => {
            let hart = build_hart(&hart)?;
            println!("{}", hart.state().isa_string());
        }
        Commands::Dump { hart, restore, fpu } => {
            let mut hart = build_hart(&hart)?;
            if let Some(path) = restore {
                info!(path = %path.display(), "restoring checkpoint");
                hart.load_checkpoint(path)?;
            }
            print!("{}", HartDump::new(hart.state()).with_fpu(fpu));
        }
        Commands::Save { hart, out } => {
            let hart = build_hart(&hart)?;
            hart.save_checkpoint(&out)?;
            println!("wrote {}", out.display());
        }
        Commands::Trap { cause, interrupt } => {
            println!("{}", trap_name(cause, interrupt));
        }
    }
    Ok(())
}

/// Builds and realizes hart 0 from the configuration file and model flag.
fn build_hart(args: &HartArgs) -> Result<Hart, HartError> {
    let mut config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(model) = args.model {
        config.hart.model = model;
    }
    let mut hart = Hart::new(0, config.hart_config());
    hart.realize(&mut NullEngine)?;
    debug!(model = ?config.hart.model, isa = %hart.state().isa_string(), "hart realized");
    Ok(hart)
}
