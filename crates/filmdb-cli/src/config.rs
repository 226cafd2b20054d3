use clap::{Parser, Subcommand};

use crate::commands::{import::ImportCmd, list::ListCmd, migrate::MigrateCmd};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for filmdb - maintenance of film catalog database."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Migrate(MigrateCmd),
    Import(ImportCmd),
    List(ListCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Migrate(cmd) => cmd.run().await,
            Command::Import(cmd) => cmd.run().await,
            Command::List(cmd) => cmd.run().await,
        }
    }
}
