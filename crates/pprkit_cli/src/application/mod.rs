pub mod handlers;
pub mod repl;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::presentation::cli::{Cli, Commands};

/// Install the stderr log subscriber; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Preview { file, delete_lines } => handlers::handle_preview(file, delete_lines),
        Commands::Convert {
            file,
            delete_lines,
            out_dir,
            no_clobber,
        } => handlers::handle_convert(file, delete_lines, out_dir, no_clobber),
        Commands::Edit {
            file,
            out_dir,
            no_clobber,
        } => handlers::handle_edit(file, out_dir, no_clobber),
    }
}
