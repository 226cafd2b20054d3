use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use filmdb_dal::film::CreateFilm;
use filmdb_types::config::BackendConfig;
use garde::Validate as _;
use tracing::{debug, warn};

use crate::commands::{create_film_repository, Executor};

#[derive(Args, Debug)]
pub struct ImportCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[arg(help = "JSON file with array of films")]
    file: PathBuf,
    #[arg(long, help = "Abort whole import if any film is invalid")]
    strict: bool,
}

/// Parses and validates all records, invalid ones are reported by their position
fn parse_films(data: &str) -> anyhow::Result<Vec<Result<CreateFilm, String>>> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(data).context("Import file must contain JSON array of films")?;
    let films = records
        .into_iter()
        .map(|record| {
            let film: CreateFilm = serde_json::from_value(record).map_err(|e| e.to_string())?;
            film.validate().map_err(|e| e.to_string())?;
            Ok(film)
        })
        .collect();
    Ok(films)
}

impl Executor for ImportCmd {
    async fn run(self) -> anyhow::Result<()> {
        let data = tokio::fs::read_to_string(&self.file)
            .await
            .with_context(|| format!("Cannot read {}", self.file.display()))?;
        let films = parse_films(&data)?;
        let repository = create_film_repository(&self.backend).await?;

        if self.strict {
            let films = films
                .into_iter()
                .enumerate()
                .map(|(idx, film)| film.map_err(|e| anyhow::anyhow!("Invalid film #{idx}: {e}")))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let ids = repository.create_many(films).await?;
            println!("Imported {} films", ids.len());
        } else {
            let mut imported = 0;
            let mut skipped = 0;
            for (idx, film) in films.into_iter().enumerate() {
                match film {
                    Ok(film) => {
                        let film = repository.create(film).await?;
                        debug!("Imported film {} as {}", film.title, film.id);
                        imported += 1;
                    }
                    Err(e) => {
                        warn!("Skipping invalid film #{idx}: {e}");
                        skipped += 1;
                    }
                }
            }
            println!("Imported {imported} films, skipped {skipped} invalid");
        }

        Ok(())
    }
}
