pub mod import;
pub mod list;
pub mod migrate;

use filmdb_dal::film::FilmRepository;
use filmdb_types::config::BackendConfig;

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self) -> anyhow::Result<()>;
}

/// Opens database, creating data directory, database and schema when missing
async fn create_film_repository(backend: &BackendConfig) -> anyhow::Result<FilmRepository> {
    let data_dir = backend.data_dir();
    if !data_dir.is_dir() {
        tokio::fs::create_dir_all(&data_dir).await?;
    }
    let pool = filmdb_dal::new_pool(&backend.database_url()).await?;
    filmdb_dal::migrate(&pool).await?;
    Ok(FilmRepository::new(pool))
}
