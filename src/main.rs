use std::path::Path;

use clap::Parser;
use env_logger::Env;
use glyphrom::cli::{Cli, Commands};
use glyphrom::manifest::Manifest;
use glyphrom::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let printer = Printer::new();
    let manifest = || Manifest::resolve(cli.manifest.as_deref(), Path::new("."));

    match cli.command {
        Commands::Init(args) => glyphrom::cli::init::run(args, &printer)?,
        Commands::Import(args) => glyphrom::cli::import::run(args, &manifest()?, &printer)?,
        Commands::Export(args) => glyphrom::cli::export::run(args, &manifest()?, &printer)?,
        Commands::Edit(args) => glyphrom::cli::edit::run(args, &manifest()?, &printer)?,
        Commands::Show(args) => glyphrom::cli::show::run(args, &manifest()?, &printer)?,
        Commands::Completions(args) => glyphrom::cli::completions::run(args)?,
    }

    Ok(())
}
