#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "d2odoc", about = "D2O game data inspection tools")]
struct Cli {
	/// Log decoder progress at debug level.
	#[arg(short, long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print header and table statistics.
	Info(cmd::info::Args),
	/// List class schemas or show one schema.
	Classes(cmd::classes::Args),
	/// Decode one object by id.
	Show(cmd::show::Args),
	/// Decode every object in the container.
	Objects(cmd::objects::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> d2odoc::d2o::Result<()> {
	match command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Classes(args) => cmd::classes::run(args),
		Commands::Show(args) => cmd::show::run(args),
		Commands::Objects(args) => cmd::objects::run(args),
	}
}

fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
