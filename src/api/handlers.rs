use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::models::{RecoResponse, UserIdParam};
use crate::services::Recommender;

use super::auth::BearerToken;
use super::AppState;

/// Liveness probe
pub async fn health() -> Json<&'static str> {
    Json("I am alive")
}

/// Ranked recommendations for one user from one model
///
/// A non-integer user id is rejected before anything else. After that, checks
/// run in order and stop at the first failure: token, user id bound, model
/// dispatch.
pub async fn get_reco(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<RecoResponse>> {
    let Path((model_name, raw_user_id)) =
        path.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let user_id: UserIdParam = raw_user_id
        .parse::<UserIdParam>()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    tracing::info!(model_name = %model_name, user_id = %raw_user_id, "Request for recommendations");

    if !state.config.token_matches(&token) {
        tracing::warn!(model_name = %model_name, user_id = %raw_user_id, "Rejected request with invalid token");
        return Err(AppError::Unauthorized);
    }

    let user_id = match user_id {
        UserIdParam::InRange(id) => id,
        UserIdParam::AboveRange(digits) => return Err(AppError::UserNotFound(digits)),
    };
    Recommender::check_user(user_id)?;

    let items = state.recommender.recommend(&model_name, user_id).await?;

    Ok(Json(RecoResponse { user_id, items }))
}
