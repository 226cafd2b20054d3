use crate::{ChosenDB, Error, error::Result};
use filmdb_types::{
    FilmFilter,
    utils::{fold_case, number_or_string},
};
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::{Acquire, Executor, Pool, QueryBuilder};
use tracing::debug;

const SELECT_FILMS: &str =
    "SELECT id, title, genre, director, release_year, rating, description FROM film";
const LIKE_ESCAPE: &str = " ESCAPE '\\'";

fn not_blank(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        Err(garde::Error::new("must not be blank"))
    } else {
        Ok(())
    }
}

fn finite(value: &f64, _ctx: &()) -> garde::Result {
    if value.is_finite() {
        Ok(())
    } else {
        Err(garde::Error::new("must be a finite number"))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateFilm {
    #[garde(custom(not_blank), length(utf16, max = 100))]
    pub title: String,
    #[garde(custom(not_blank), length(utf16, max = 50))]
    pub genre: String,
    #[garde(custom(not_blank), length(utf16, max = 100))]
    pub director: String,
    #[garde(range(min = 1900, max = 2100))]
    #[serde(deserialize_with = "number_or_string")]
    pub release_year: i32,
    #[garde(custom(finite), range(min = 1.0, max = 10.0))]
    #[serde(deserialize_with = "number_or_string")]
    pub rating: f64,
    #[garde(length(utf16, max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, sqlx::FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub director: String,
    pub release_year: i32,
    pub rating: f64,
    pub description: Option<String>,
}

/// Substring pattern for LIKE against folded columns, user input is matched literally
fn like_pattern(value: &str) -> String {
    let value = fold_case(value);
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn listing_query(filter: &FilmFilter) -> QueryBuilder<'static, ChosenDB> {
    let mut builder = QueryBuilder::new(SELECT_FILMS);
    let mut separator = " WHERE ";

    if let Some(genre) = filter.genre.as_deref() {
        builder
            .push(separator)
            .push("genre_folded LIKE ")
            .push_bind(like_pattern(genre))
            .push(LIKE_ESCAPE);
        separator = " AND ";
    }

    if let Some(search) = filter.search.as_deref() {
        let pattern = like_pattern(search);
        builder
            .push(separator)
            .push("(title_folded LIKE ")
            .push_bind(pattern.clone())
            .push(LIKE_ESCAPE)
            .push(" OR director_folded LIKE ")
            .push_bind(pattern)
            .push(LIKE_ESCAPE)
            .push(")");
    }

    builder.push(" ORDER BY ").push(filter.ordering());
    builder
}

pub type FilmRepository = FilmRepositoryImpl<Pool<ChosenDB>>;

pub struct FilmRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> FilmRepositoryImpl<E>
where
    for<'a> &'a E: Executor<'c, Database = ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateFilm) -> Result<Film> {
        payload.validate()?;
        let id = insert(&payload, &self.executor).await?;
        self.get(id).await
    }

    /// Replaces all fields of existing film
    pub async fn update(&self, id: i64, payload: CreateFilm) -> Result<()> {
        payload.validate()?;
        let result = sqlx::query(
            "UPDATE film SET title = ?, genre = ?, director = ?, release_year = ?, rating = ?, description = ?, \
            title_folded = ?, genre_folded = ?, director_folded = ? WHERE id = ?",
        )
        .bind(&payload.title)
        .bind(&payload.genre)
        .bind(&payload.director)
        .bind(payload.release_year)
        .bind(payload.rating)
        .bind(&payload.description)
        .bind(fold_case(&payload.title))
        .bind(fold_case(&payload.genre))
        .bind(fold_case(&payload.director))
        .bind(id)
        .execute(&self.executor)
        .await?;

        if result.rows_affected() == 0 {
            debug!("No film with id {id} to update");
            Err(Error::RecordNotFound("Film".to_string()))
        } else {
            Ok(())
        }
    }

    pub async fn list(&self, filter: &FilmFilter) -> Result<Vec<Film>> {
        let mut query = listing_query(filter);
        debug!("Listing films with: {}", query.sql());
        let records = query
            .build_query_as::<Film>()
            .fetch_all(&self.executor)
            .await?;
        Ok(records)
    }

    pub async fn list_all(&self) -> Result<Vec<Film>> {
        self.list(&FilmFilter::default()).await
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM film")
            .fetch_one(&self.executor)
            .await?;
        Ok(count as u64)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM film WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound("Film".to_string()))
        } else {
            Ok(())
        }
    }

    pub async fn get(&self, id: i64) -> Result<Film> {
        sqlx::query_as::<_, Film>(&format!("{SELECT_FILMS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("Film".to_string()))
    }
}

impl<'c, E> FilmRepositoryImpl<E>
where
    for<'a> &'a E: Executor<'c, Database = ChosenDB> + Acquire<'c, Database = ChosenDB>,
{
    /// Inserts all films in one transaction, nothing is written if any of them is invalid
    pub async fn create_many(&self, payloads: Vec<CreateFilm>) -> Result<Vec<i64>> {
        for payload in &payloads {
            payload.validate()?;
        }

        let mut tx = self.executor.begin().await?;
        let mut ids = Vec::with_capacity(payloads.len());
        for payload in &payloads {
            ids.push(insert(payload, &mut *tx).await?);
        }
        tx.commit().await?;

        Ok(ids)
    }
}

async fn insert<'c, E>(payload: &CreateFilm, executor: E) -> Result<i64>
where
    E: Executor<'c, Database = ChosenDB>,
{
    let result = sqlx::query(
        "INSERT INTO film (title, genre, director, release_year, rating, description, \
        title_folded, genre_folded, director_folded) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.title)
    .bind(&payload.genre)
    .bind(&payload.director)
    .bind(payload.release_year)
    .bind(payload.rating)
    .bind(&payload.description)
    .bind(fold_case(&payload.title))
    .bind(fold_case(&payload.genre))
    .bind(fold_case(&payload.director))
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}
