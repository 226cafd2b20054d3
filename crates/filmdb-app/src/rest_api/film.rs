use crate::{repository_from_request, state::AppState};
use axum::routing::get;
use filmdb_dal::film::FilmRepository;
use filmdb_types::FilmFilter;
use serde::Deserialize;

repository_from_request!(FilmRepository);

/// Query parameters of film listing
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct FilmListQuery {
    /// Part of genre, case insensitive
    pub genre: Option<String>,
    /// Part of title or director, case insensitive
    pub search: Option<String>,
    /// `rating`, `releaseYear` or `title` (default), unknown values sort by title
    pub sort_by: Option<String>,
    /// `asc` (default), any other value sorts descending
    pub sort_order: Option<String>,
}

impl From<FilmListQuery> for FilmFilter {
    fn from(query: FilmListQuery) -> Self {
        FilmFilter::new(
            query.genre,
            query.search,
            query.sort_by.as_deref(),
            query.sort_order.as_deref(),
        )
    }
}

pub mod crud_api {
    use super::FilmListQuery;
    use crate::{error::ApiResult, validate::ValidJson};
    use axum::{
        extract::{OriginalUri, Path, Query},
        response::IntoResponse,
        Json,
    };
    #[cfg_attr(not(feature = "openapi"), allow(unused_imports))]
    use filmdb_dal::film::{CreateFilm, Film, FilmRepository};
    use http::{header, StatusCode};
    use tracing::debug;

    #[cfg_attr(feature = "openapi",  utoipa::path(get, path = "", tag = "Film", operation_id = "listFilms",
        params(FilmListQuery), responses((status = StatusCode::OK, description = "All films matching filter", body = Vec<Film>))))]
    pub async fn list(
        repository: FilmRepository,
        Query(query): Query<FilmListQuery>,
    ) -> ApiResult<impl IntoResponse> {
        debug!("Listing films: {:?}", query);
        let films = repository.list(&query.into()).await?;
        Ok((StatusCode::OK, Json(films)))
    }

    #[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/{id}", tag = "Film", operation_id = "getFilm",
        params(("id" = i64, Path, description = "Film id")),
        responses((status = StatusCode::OK, description = "Film detail", body = Film),
            (status = StatusCode::NOT_FOUND, description = "No such film"))))]
    pub async fn get(
        Path(id): Path<i64>,
        repository: FilmRepository,
    ) -> ApiResult<impl IntoResponse> {
        let record = repository.get(id).await?;

        Ok((StatusCode::OK, Json(record)))
    }

    #[cfg_attr(feature = "openapi",  utoipa::path(post, path = "", tag = "Film", operation_id = "createFilm",
        request_body = CreateFilm,
        responses((status = StatusCode::CREATED, description = "Created film", body = Film),
            (status = StatusCode::BAD_REQUEST, description = "Invalid film"))))]
    pub async fn create(
        OriginalUri(uri): OriginalUri,
        repository: FilmRepository,
        ValidJson(payload): ValidJson<CreateFilm>,
    ) -> ApiResult<impl IntoResponse> {
        let record = repository.create(payload).await?;
        let location = format!("{}/{}", uri.path().trim_end_matches('/'), record.id);
        debug!("Created film {location}");

        Ok((
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(record),
        ))
    }

    #[cfg_attr(feature = "openapi",  utoipa::path(put, path = "/{id}", tag = "Film", operation_id = "updateFilm",
        params(("id" = i64, Path, description = "Film id")),
        request_body = CreateFilm,
        responses((status = StatusCode::NO_CONTENT, description = "Film replaced"),
            (status = StatusCode::BAD_REQUEST, description = "Invalid film"),
            (status = StatusCode::NOT_FOUND, description = "No such film"))))]
    pub async fn update(
        Path(id): Path<i64>,
        repository: FilmRepository,
        ValidJson(payload): ValidJson<CreateFilm>,
    ) -> ApiResult<impl IntoResponse> {
        repository.update(id, payload).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    #[cfg_attr(feature = "openapi",  utoipa::path(delete, path = "/{id}", tag = "Film", operation_id = "deleteFilm",
        params(("id" = i64, Path, description = "Film id")),
        responses((status = StatusCode::NO_CONTENT, description = "Film deleted"),
            (status = StatusCode::NOT_FOUND, description = "No such film"))))]
    pub async fn delete(
        Path(id): Path<i64>,
        repository: FilmRepository,
    ) -> ApiResult<impl IntoResponse> {
        repository.delete(id).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    #[cfg(feature = "openapi")]
    #[derive(utoipa::OpenApi)]
    #[openapi(
        paths(list, get, create, update, delete),
        components(schemas(Film, CreateFilm))
    )]
    struct ApiDocs;

    #[cfg(feature = "openapi")]
    pub(super) fn api_docs() -> utoipa::openapi::OpenApi {
        use utoipa::OpenApi as _;
        ApiDocs::openapi()
    }
}

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    crud_api::api_docs()
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(crud_api::list).post(crud_api::create))
        .route(
            "/{id}",
            get(crud_api::get)
                .put(crud_api::update)
                .delete(crud_api::delete),
        )
}
