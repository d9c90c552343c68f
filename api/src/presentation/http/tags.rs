use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::tags::word_cloud::GetWordCloud;
use crate::bootstrap::app_context::AppContext;
use crate::domain::tags::tag::WeightedTag;

/// One word cloud entry. Both fields are strings on the wire.
#[derive(Debug, Serialize, ToSchema)]
pub struct WordCloudItem {
    pub text: String,
    pub value: String,
}

impl From<WeightedTag> for WordCloudItem {
    fn from(w: WeightedTag) -> Self {
        WordCloudItem {
            text: w.name,
            value: w.weight.to_string(),
        }
    }
}

#[utoipa::path(get, path = "/api/v4", tag = "Tags",
    responses((status = 200, description = "Tags ascending by hit count", body = [WordCloudItem])))]
pub async fn word_cloud(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<WordCloudItem>>, StatusCode> {
    let repo = ctx.tag_repo();
    let uc = GetWordCloud {
        repo: repo.as_ref(),
        limit: ctx.cfg.word_cloud_tag_limit,
    };
    let weighted = uc.execute().await.map_err(|e| {
        tracing::error!(error = ?e, "word_cloud_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(weighted.into_iter().map(Into::into).collect()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/v4", get(word_cloud)).with_state(ctx)
}
