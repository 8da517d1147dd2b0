//! Handlers for theme normalization and style resolution.

use axum::Json;
use creon_core::style::{self, ResolvedStyle, Viewport};
use creon_core::theme::{self, RawThemeConfig, ThemeConfig};
use serde::{Deserialize, Serialize};

use crate::response::DataResponse;

/// Body for the style endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRequest {
    #[serde(default)]
    pub theme: RawThemeConfig,
    pub viewport_width: Option<u32>,
}

/// Normalized theme plus the fields that took their default.
#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub data: ThemeConfig,
    pub fallbacks: Vec<&'static str>,
}

/// POST /api/v1/theme/normalize
///
/// Resolve a raw, possibly partial theme. Never fails on theme content.
pub async fn normalize_theme(Json(raw): Json<RawThemeConfig>) -> Json<NormalizeResponse> {
    let normalized = theme::normalize_with_report(&raw);

    if !normalized.fallbacks.is_empty() {
        tracing::debug!(
            fallback_count = normalized.fallbacks.len(),
            fallbacks = ?normalized.fallbacks,
            "Theme fields resolved to defaults",
        );
    }

    Json(NormalizeResponse {
        data: normalized.theme,
        fallbacks: normalized.fallbacks,
    })
}

/// POST /api/v1/theme/style
///
/// Resolve style primitives for a theme, optionally clamped to a viewport.
pub async fn resolve_theme_style(Json(body): Json<StyleRequest>) -> Json<DataResponse<ResolvedStyle>> {
    let theme = theme::normalize(&body.theme);
    let viewport = Viewport {
        width_px: body.viewport_width,
    };

    Json(DataResponse {
        data: style::resolve_style_for_viewport(&theme, viewport),
    })
}
