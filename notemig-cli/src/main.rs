mod cli;
mod render;

use anyhow::Result;
use cli::Cli;
use notemig_core::Notemig;
use render::{RenderOptions, Renderer};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::new();
    init_logger(&cli);

    if let Err(message) = cli.validate() {
        eprintln!("notemig: {message}\n\n{}", Cli::usage());
        return ExitCode::from(2);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("notemig: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_logger(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.apply(Notemig::new()?.config);
    let notemig = Notemig::with_config(config);
    let renderer = Renderer::new(RenderOptions {
        use_color: cli.color.use_color(),
        dry_run: notemig.config.dry_run,
    });

    let summary = notemig.run(&cli.source, &cli.destination, cli.attachments.as_deref())?;
    renderer.print_summary(&summary);
    Ok(())
}
