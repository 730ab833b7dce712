//! memfit command processor
//!
//! Reads one command from a command file, applies it to the memory state
//! stored in a state file and writes the state back. Failures print a single
//! line containing `Erro` and exit with status 1; success prints nothing
//! unless a display flag is given.

use clap::Parser;
use memfit::core::state;
use memfit::{MemoryMap, Processor, SimConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "memfit-processor")]
#[command(about = "Apply one alocar/liberar command to a simulated memory state file")]
struct Args {
    /// Command file (default: comando.txt)
    command_file: Option<PathBuf>,

    /// State file (default: estado.txt)
    state_file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Number of memory units
    #[arg(short = 'n', long)]
    memory_size: Option<usize>,

    /// Cells per row when printing the memory grid
    #[arg(long)]
    columns: Option<usize>,

    /// Failure log file
    #[arg(long, conflicts_with = "no_log")]
    log_file: Option<PathBuf>,

    /// Do not write a failure log
    #[arg(long)]
    no_log: bool,

    /// Print the memory grid after the command
    #[arg(short = 'p', long)]
    print: bool,

    /// Print fragmentation statistics after the command
    #[arg(short = 'r', long)]
    report: bool,

    /// Emit fragmentation statistics as JSON (implies --report)
    #[arg(long)]
    json: bool,

    /// Run the built-in demonstration sequence instead of a command file
    #[arg(long)]
    demo: bool,
}

impl Args {
    /// Configuration file values overridden by command-line flags
    fn resolve_config(&self) -> anyhow::Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };

        if let Some(size) = self.memory_size {
            config.memory_size = size;
        }
        if let Some(columns) = self.columns {
            config.display_columns = columns;
        }
        if let Some(path) = &self.log_file {
            config.failure_log = Some(path.clone());
        }
        if self.no_log {
            config.failure_log = None;
        }
        if let Some(path) = &self.command_file {
            config.command_file = path.clone();
        }
        if let Some(path) = &self.state_file {
            config.state_file = path.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn show(args: &Args, memory: &MemoryMap) -> anyhow::Result<()> {
    if args.print {
        print!("{}", memory);
    }

    let report = memfit::analyze_fragmentation(memory.units());
    if args.json {
        println!("{}", report.to_json()?);
    } else if args.report {
        println!("{}", report);
    }

    Ok(())
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.resolve_config()?;
    let processor = Processor::new(config)?;
    let config = processor.config();

    if args.demo {
        let (engine, failures) = processor.run_demo();
        for (command, error) in &failures {
            println!("[ERRO] {} | {}", command, error);
        }
        state::save(&config.state_file, engine.memory())?;
        print!("{}", engine.memory());
        println!("{}", engine.fragmentation());
        return Ok(());
    }

    let (engine, outcome) = processor.process_files(&config.command_file, &config.state_file)?;
    info!(?outcome, "done");

    show(args, engine.memory())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("MEMFIT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let message = e.to_string();
            let detail = message.lines().next().unwrap_or_default();
            println!("Erro nos argumentos: {}", detail.trim_start_matches("error: "));
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}
