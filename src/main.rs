use clap::Parser;
use screen_index::cli::commands::{cmd_collect, cmd_overlay};
use screen_index::cli::config::{Cli, Commands, load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // --debug asks for the per-pass diagnostics, which log at debug level.
    let debug_requested = match &cli.command {
        Commands::Collect { args, .. } | Commands::Overlay { args, .. } => args.debug,
    };
    init_logging(if debug_requested { cli.verbose.max(2) } else { cli.verbose });

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Collect {
            args,
            format,
            output,
        } => {
            cmd_collect(&config, &args, &format, output.as_deref())?;
        }
        Commands::Overlay { args, output } => {
            cmd_overlay(&config, &args, &output)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` count picks the level. Logs go to stderr.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
