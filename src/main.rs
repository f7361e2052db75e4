use clap::Parser;
use iris_mlops::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Deploy(args) => cli::deploy::run(args).await,
        Command::Invoke(args) => cli::invoke::run(args).await,
        Command::Preprocess(args) => cli::preprocess::run(args).await,
        Command::Train(args) => cli::train::run(args).await,
    }
}
