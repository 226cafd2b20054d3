use clap::Args;
use filmdb_dal::film::Film;
use filmdb_types::{config::BackendConfig, FilmFilter};

use crate::commands::{create_film_repository, Executor};

#[derive(Args, Debug)]
pub struct ListCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[arg(short, long, help = "Part of genre, case insensitive")]
    genre: Option<String>,
    #[arg(short, long, help = "Part of title or director, case insensitive")]
    search: Option<String>,
    #[arg(
        long,
        default_value = "title",
        help = "Sort by rating, releaseYear or title, unknown values sort by title"
    )]
    sort_by: String,
    #[arg(
        long,
        default_value = "asc",
        help = "Sort order, asc is ascending, any other value descending"
    )]
    sort_order: String,
}

fn format_film(film: &Film) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{:.1}",
        film.id, film.title, film.genre, film.director, film.release_year, film.rating
    )
}

impl Executor for ListCmd {
    async fn run(self) -> anyhow::Result<()> {
        let repository = create_film_repository(&self.backend).await?;
        let filter = FilmFilter::new(
            self.genre,
            self.search,
            Some(self.sort_by.as_str()),
            Some(self.sort_order.as_str()),
        );
        for film in repository.list(&filter).await? {
            println!("{}", format_film(&film));
        }
        Ok(())
    }
}
