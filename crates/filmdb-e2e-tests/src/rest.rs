use anyhow::{Result, anyhow};
use filmdb_dal::film::Film;
use reqwest::Url;
use serde_json::json;
use tracing::info;

pub fn film_payload(title: &str, genre: &str, director: &str, year: i32, rating: f64) -> serde_json::Value {
    json!({
        "title": title,
        "genre": genre,
        "director": director,
        "releaseYear": year,
        "rating": rating,
    })
}

pub async fn create_film(
    client: &reqwest::Client,
    base_url: &Url,
    payload: &serde_json::Value,
) -> Result<Film> {
    let api_url = base_url.join("api/films")?;

    let response = client.post(api_url).json(payload).send().await?;
    info!("Create response: {:#?}", response);
    if response.status().as_u16() != 201 {
        return Err(anyhow!("Unexpected status {}", response.status()));
    }

    let new_film: Film = response.json().await?;
    Ok(new_film)
}

pub async fn list_films(client: &reqwest::Client, base_url: &Url, query: &str) -> Result<Vec<Film>> {
    let mut api_url = base_url.join("api/films")?;
    if !query.is_empty() {
        api_url.set_query(Some(query));
    }

    let response = client.get(api_url).send().await?;
    if !response.status().is_success() {
        return Err(anyhow!("Unexpected status {}", response.status()));
    }
    let films: Vec<Film> = response.json().await?;
    Ok(films)
}
