use clap::Args;
use filmdb_types::config::BackendConfig;

use crate::commands::{create_film_repository, Executor};

#[derive(Args, Debug)]
pub struct MigrateCmd {
    #[command(flatten)]
    backend: BackendConfig,
}

impl Executor for MigrateCmd {
    async fn run(self) -> anyhow::Result<()> {
        let repository = create_film_repository(&self.backend).await?;
        let count = repository.count().await?;
        println!(
            "Database {} is ready, it contains {} films",
            self.backend.database_url(),
            count
        );
        Ok(())
    }
}
