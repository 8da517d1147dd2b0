//! Handler for the profile view model consumed by every profile surface.

use axum::response::IntoResponse;
use axum::Json;
use creon_core::content::{self, ContentSnapshot};
use creon_core::profile::{self, ContentLoad, PresentationState, RenderContext};
use creon_core::style::Viewport;
use creon_core::tabs::ContentTab;
use creon_core::theme::RawThemeConfig;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;

/// Body for the profile view endpoint.
///
/// The host passes the outcome of its own content fetch: `contentError` when
/// the fetch failed, `content` when it succeeded, neither while loading.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileViewRequest {
    #[serde(default)]
    pub theme: RawThemeConfig,
    pub content: Option<ContentSnapshot>,
    pub content_error: Option<String>,
    pub viewport_width: Option<u32>,
    pub requested_tab: Option<ContentTab>,
}

impl ProfileViewRequest {
    fn into_parts(self) -> (RawThemeConfig, ContentLoad, RenderContext) {
        let load = match (self.content_error, self.content) {
            (Some(message), _) => ContentLoad::Failed { message },
            (None, Some(snapshot)) => ContentLoad::Loaded(snapshot),
            (None, None) => ContentLoad::Loading,
        };
        let context = RenderContext {
            viewport: Viewport {
                width_px: self.viewport_width,
            },
            requested_tab: self.requested_tab,
        };
        (self.theme, load, context)
    }
}

/// POST /api/v1/profile/view
///
/// Build the render-ready view model for a profile page.
pub async fn build_view(Json(body): Json<ProfileViewRequest>) -> AppResult<impl IntoResponse> {
    if let Some(snapshot) = &body.content {
        content::validate_snapshot_limits(snapshot)?;
    }

    let (theme, load, context) = body.into_parts();
    let view = profile::build_profile_view(&theme, &load, &context);

    match &view.state {
        PresentationState::Error { message } => {
            tracing::warn!(error = %message, "Profile rendered in error state");
        }
        state => {
            tracing::debug!(
                state = ?state,
                links = view.links.len(),
                collections = view.collections.len(),
                default_tab = ?view.default_tab,
                "Profile view built",
            );
        }
    }

    Ok(Json(DataResponse { data: view }))
}
