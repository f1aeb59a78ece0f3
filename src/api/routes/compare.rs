use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::{parse_tag, ApiError};
use crate::calculate::compare_players;
use crate::fetch::fetch_comparison;
use crate::models::CompareOutcome;

pub async fn compare(
    State(state): State<AppState>,
    Path((a, b)): Path<(String, String)>,
) -> Result<Json<CompareOutcome>, ApiError> {
    let a_tag = parse_tag(&a)?;
    let b_tag = parse_tag(&b)?;

    let (a, b, catalog) = fetch_comparison(state.api.as_ref(), &a_tag, &b_tag).await;

    Ok(Json(compare_players(
        &a_tag,
        a.as_ref(),
        &b_tag,
        b.as_ref(),
        &catalog,
    )))
}
