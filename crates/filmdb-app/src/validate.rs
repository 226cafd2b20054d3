use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;
use axum_valid::{Garde, GardeRejection, ValidationRejection};

use crate::{error::ApiError, state::AppState};

/// JSON body validated with garde, rejections are reported as [`ApiError`]
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl From<GardeRejection<JsonRejection>> for ApiError {
    fn from(value: GardeRejection<JsonRejection>) -> Self {
        match value {
            ValidationRejection::Valid(report) => ApiError::InvalidRequest(report.to_string()),
            ValidationRejection::Inner(rejection) => ApiError::InvalidBody(rejection),
        }
    }
}

impl<T> FromRequest<AppState> for ValidJson<T>
where
    Garde<Json<T>>: FromRequest<AppState, Rejection = GardeRejection<JsonRejection>>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Garde(Json(value)) = Garde::<Json<T>>::from_request(req, state).await?;
        Ok(ValidJson(value))
    }
}
