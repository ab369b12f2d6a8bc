mod commands;

use std::path::PathBuf;

use clap::Parser;

use commands::Action;

#[derive(Parser)]
#[command(name = "mdeploy", about = "Build and containerize Meteor application bundles")]
#[command(version)]
struct Cli {
    /// Deployment target, e.g. `staging` or `production`. Selects the
    /// `<target>.json` and `<target>.config.json` file pair.
    target: String,

    /// Actions to perform; all are performed when none are given
    #[arg(value_enum)]
    actions: Vec<Action>,

    /// Directory containing the settings and config files
    /// (defaults to the current directory)
    #[arg(long)]
    source: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    commands::deploy(&cli.target, &cli.actions, cli.source.as_deref())
}
