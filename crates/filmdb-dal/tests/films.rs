use filmdb_dal::{
    Error,
    film::{CreateFilm, Film, FilmRepositoryImpl},
};
use filmdb_types::{FilmFilter, SortBy, SortOrder};
use futures::TryStreamExt as _;
use sqlx::Executor;

const TEST_DATA: &str = r#"
INSERT INTO film (id, title, genre, director, release_year, rating, description,
    title_folded, genre_folded, director_folded)
VALUES (1, 'Film 1', 'Drama', 'Director 1', 2020, 7.8, 'Description for Film 1', 'film 1', 'drama', 'director 1');
INSERT INTO film (id, title, genre, director, release_year, rating, description,
    title_folded, genre_folded, director_folded)
VALUES (2, 'Film 2', 'Action', 'Director 2', 2021, 8.5, 'Description for Film 2', 'film 2', 'action', 'director 2');
INSERT INTO film (id, title, genre, director, release_year, rating, description,
    title_folded, genre_folded, director_folded)
VALUES (3, 'Film 3', 'Drama', 'Director 3', 2019, 6.5, NULL, 'film 3', 'drama', 'director 3');
INSERT INTO film (id, title, genre, director, release_year, rating, description,
    title_folded, genre_folded, director_folded)
VALUES (4, 'another story', 'Melodrama', 'Jane Nolan', 1999, 9.1, NULL, 'another story', 'melodrama', 'jane nolan');
INSERT INTO film (id, title, genre, director, release_year, rating, description,
    title_folded, genre_folded, director_folded)
VALUES (5, '100% Pure', 'Documentary', 'Anna Smith', 2005, 5.0, NULL, '100% pure', 'documentary', 'anna smith');
"#;

async fn init_db() -> sqlx::Pool<sqlx::Sqlite> {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    sqlx::migrate!("../../migrations").run(&conn).await.unwrap();

    conn
}

async fn init_db_with_data() -> sqlx::Pool<sqlx::Sqlite> {
    let conn = init_db().await;
    conn.execute_many(TEST_DATA)
        .try_collect::<Vec<_>>()
        .await
        .unwrap();
    conn
}

fn new_film(title: &str) -> CreateFilm {
    CreateFilm {
        title: title.to_string(),
        genre: "Comedy".to_string(),
        director: "John Doe".to_string(),
        release_year: 2022,
        rating: 6.5,
        description: Some("A funny movie".to_string()),
    }
}

fn titles(films: &[Film]) -> Vec<&str> {
    films.iter().map(|f| f.title.as_str()).collect()
}

#[tokio::test]
async fn test_list_default_sorted_by_title() {
    let conn = init_db_with_data().await;
    let repo = FilmRepositoryImpl::new(conn);

    let films = repo.list_all().await.unwrap();
    assert_eq!(films.len(), 5);
    assert_eq!(
        titles(&films),
        vec!["100% Pure", "another story", "Film 1", "Film 2", "Film 3"]
    );
}

#[tokio::test]
async fn test_list_by_genre() {
    let conn = init_db_with_data().await;
    let repo = FilmRepositoryImpl::new(conn);

    let filter = FilmFilter::new(Some("Drama".into()), None, Some("rating"), Some("desc"));
    let films = repo.list(&filter).await.unwrap();
    // substring match, so Melodrama is included
    assert_eq!(titles(&films), vec!["another story", "Film 1", "Film 3"]);

    let filter = FilmFilter::default().with_genre("dRaMa");
    let films = repo.list(&filter).await.unwrap();
    assert_eq!(films.len(), 3);
    assert!(films.iter().all(|f| f.genre.to_lowercase().contains("drama")));

    let filter = FilmFilter::default().with_genre("western");
    assert!(repo.list(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_title_or_director() {
    let conn = init_db_with_data().await;
    let repo = FilmRepositoryImpl::new(conn);

    let filter = FilmFilter::default().with_search("NOLAN");
    let films = repo.list(&filter).await.unwrap();
    assert_eq!(titles(&films), vec!["another story"]);

    let filter = FilmFilter::default().with_search("film 2");
    let films = repo.list(&filter).await.unwrap();
    assert_eq!(titles(&films), vec!["Film 2"]);

    let filter = FilmFilter::default()
        .with_search("director")
        .with_genre("action");
    let films = repo.list(&filter).await.unwrap();
    assert_eq!(titles(&films), vec!["Film 2"]);
}

#[tokio::test]
async fn test_search_wildcards_are_literal() {
    let conn = init_db_with_data().await;
    let repo = FilmRepositoryImpl::new(conn);

    let filter = FilmFilter::default().with_search("%");
    let films = repo.list(&filter).await.unwrap();
    assert_eq!(titles(&films), vec!["100% Pure"]);

    let filter = FilmFilter::default().with_search("_");
    assert!(repo.list(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_ascii_filters_ignore_case() {
    let conn = init_db().await;
    let repo = FilmRepositoryImpl::new(conn);

    let mut film = new_film("Élite");
    film.genre = "Комедия".to_string();
    film.director = "Émile Zola".to_string();
    repo.create(film).await.unwrap();
    repo.create(new_film("Zorro")).await.unwrap();
    repo.create(new_film("éclair")).await.unwrap();

    let filter = FilmFilter::default().with_genre("комедия");
    assert_eq!(titles(&repo.list(&filter).await.unwrap()), vec!["Élite"]);

    let filter = FilmFilter::default().with_genre("КОМЕД");
    assert_eq!(titles(&repo.list(&filter).await.unwrap()), vec!["Élite"]);

    let filter = FilmFilter::default().with_search("élite");
    assert_eq!(titles(&repo.list(&filter).await.unwrap()), vec!["Élite"]);

    let filter = FilmFilter::default().with_search("ÉMILE");
    assert_eq!(titles(&repo.list(&filter).await.unwrap()), vec!["Élite"]);

    // folded titles sort together regardless of case
    let films = repo.list_all().await.unwrap();
    assert_eq!(titles(&films), vec!["Zorro", "éclair", "Élite"]);

    let mut renamed = new_film("ÖL");
    renamed.genre = "Драма".to_string();
    let id = films[2].id;
    repo.update(id, renamed).await.unwrap();
    let filter = FilmFilter::default().with_genre("драма").with_search("öl");
    let found = repo.list(&filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);
    let filter = FilmFilter::default().with_genre("комедия");
    assert!(repo.list(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sort_by_release_year() {
    let conn = init_db_with_data().await;
    let repo = FilmRepositoryImpl::new(conn);

    let filter = FilmFilter::new(None, None, Some("releaseyear"), Some("asc"));
    let films = repo.list(&filter).await.unwrap();
    let years: Vec<i32> = films.iter().map(|f| f.release_year).collect();
    assert_eq!(years, vec![1999, 2005, 2019, 2020, 2021]);

    let filter = FilmFilter::default().sorted(SortBy::ReleaseYear, SortOrder::Desc);
    let films = repo.list(&filter).await.unwrap();
    assert_eq!(films.first().unwrap().release_year, 2021);
    assert_eq!(films.last().unwrap().release_year, 1999);
}

#[tokio::test]
async fn test_unknown_sort_order_is_descending() {
    let conn = init_db_with_data().await;
    let repo = FilmRepositoryImpl::new(conn);

    let filter = FilmFilter::new(None, None, Some("RATING"), Some("whatever"));
    let films = repo.list(&filter).await.unwrap();
    let ratings: Vec<f64> = films.iter().map(|f| f.rating).collect();
    assert_eq!(ratings, vec![9.1, 8.5, 7.8, 6.5, 5.0]);

    let filter = FilmFilter::new(None, None, Some("nonsense"), Some("desc"));
    let films = repo.list(&filter).await.unwrap();
    assert_eq!(films.first().unwrap().title, "Film 3");
}

#[tokio::test]
async fn test_film_create() {
    let conn = init_db().await;
    let repo = FilmRepositoryImpl::new(conn);

    let film = repo.create(new_film("New Film")).await.unwrap();
    assert_eq!(film.title, "New Film");
    assert_eq!(film.description.as_deref(), Some("A funny movie"));
    assert_eq!(repo.count().await.unwrap(), 1);

    let fetched = repo.get(film.id).await.unwrap();
    assert_eq!(fetched, film);
}

#[tokio::test]
async fn test_invalid_film_is_not_stored() {
    let conn = init_db().await;
    let repo = FilmRepositoryImpl::new(conn);

    let mut film = new_film("Too good");
    film.rating = 11.0;
    let res = repo.create(film).await;
    assert!(matches!(res, Err(Error::InvalidRecord(_))));

    let mut film = new_film("Too old");
    film.release_year = 1895;
    let res = repo.create(film).await;
    assert!(matches!(res, Err(Error::InvalidRecord(_))));

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_film_update() {
    let conn = init_db_with_data().await;
    let repo = FilmRepositoryImpl::new(conn);

    let mut payload = new_film("Updated Film");
    payload.director = "Updated Director".to_string();
    payload.description = None;
    repo.update(1, payload).await.unwrap();

    let updated = repo.get(1).await.unwrap();
    assert_eq!(updated.title, "Updated Film");
    assert_eq!(updated.director, "Updated Director");
    assert_eq!(updated.description, None);
    assert_eq!(repo.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_update_missing_film() {
    let conn = init_db_with_data().await;
    let repo = FilmRepositoryImpl::new(conn);

    let res = repo.update(999, new_film("Ghost")).await;
    assert!(matches!(res, Err(Error::RecordNotFound(_))));
    assert_eq!(repo.count().await.unwrap(), 5);
    assert!(matches!(repo.get(999).await, Err(Error::RecordNotFound(_))));
}

#[tokio::test]
async fn test_film_delete() {
    let conn = init_db_with_data().await;
    let repo = FilmRepositoryImpl::new(conn);

    repo.delete(1).await.unwrap();
    assert!(matches!(repo.get(1).await, Err(Error::RecordNotFound(_))));
    assert_eq!(repo.count().await.unwrap(), 4);

    let res = repo.delete(1).await;
    assert!(matches!(res, Err(Error::RecordNotFound(_))));
}

#[tokio::test]
async fn test_create_many_is_all_or_nothing() {
    let conn = init_db().await;
    let repo = FilmRepositoryImpl::new(conn);

    let mut bad = new_film("Bad");
    bad.genre = String::new();
    let res = repo
        .create_many(vec![new_film("First"), bad, new_film("Third")])
        .await;
    assert!(matches!(res, Err(Error::InvalidRecord(_))));
    assert_eq!(repo.count().await.unwrap(), 0);

    let ids = repo
        .create_many(vec![new_film("First"), new_film("Second")])
        .await
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(repo.count().await.unwrap(), 2);
}
