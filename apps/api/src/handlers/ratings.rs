use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use companyrating_application::RatingListQuery;
use companyrating_core::{AppError, MutationAccess};

use crate::dto::{
    DeleteRatingsPayload, DeleteRatingsResponse, RatingListParams, RatingLookupParams,
    RatingResponse, UpsertRatingPayload, UpsertRatingResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/companies - Bounded, sorted listing.
pub async fn list_ratings_handler(
    State(state): State<AppState>,
    Query(params): Query<RatingListParams>,
) -> ApiResult<Json<Vec<RatingResponse>>> {
    let records = state
        .rating_service
        .list_ratings(RatingListQuery::from(params))
        .await?
        .into_iter()
        .map(RatingResponse::from)
        .collect();

    Ok(Json(records))
}

/// GET /api/company - Exact (name, subcompany) lookup.
pub async fn get_rating_handler(
    State(state): State<AppState>,
    Query(params): Query<RatingLookupParams>,
) -> ApiResult<Json<RatingResponse>> {
    let record = state
        .rating_service
        .get_rating(params.name.as_str(), params.subcompany.as_str())
        .await?;

    Ok(Json(RatingResponse::from(record)))
}

/// POST /api/update - Create, overwrite or rename a record.
pub async fn upsert_rating_handler(
    State(state): State<AppState>,
    Extension(access): Extension<MutationAccess>,
    Json(payload): Json<UpsertRatingPayload>,
) -> ApiResult<Json<UpsertRatingResponse>> {
    access.require()?;

    let record = state
        .rating_service
        .upsert_rating(access, payload.into_request()?)
        .await?;

    Ok(Json(UpsertRatingResponse {
        success: true,
        company: RatingResponse::from(record),
    }))
}

/// POST /api/delete - Remove one pair or every subcompany of a name.
pub async fn delete_ratings_handler(
    State(state): State<AppState>,
    Extension(access): Extension<MutationAccess>,
    Json(payload): Json<DeleteRatingsPayload>,
) -> ApiResult<(StatusCode, Json<DeleteRatingsResponse>)> {
    access.require()?;

    let result = state
        .rating_service
        .delete_ratings(access, payload.into_request()?)
        .await;

    match result {
        Ok(outcome) => Ok((
            StatusCode::OK,
            Json(DeleteRatingsResponse {
                success: true,
                deleted_count: outcome.deleted_count,
                message: None,
            }),
        )),
        Err(AppError::NotFound(message)) => Ok((
            StatusCode::NOT_FOUND,
            Json(DeleteRatingsResponse {
                success: false,
                deleted_count: 0,
                message: Some(message),
            }),
        )),
        Err(error) => Err(error.into()),
    }
}
