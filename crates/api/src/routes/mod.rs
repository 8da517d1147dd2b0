pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{profile, theme, video};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /theme/normalize        normalize a raw theme (POST)
/// /theme/style            resolve style primitives (POST)
/// /profile/view           build the full profile view model (POST)
/// /video/classify?url=    classify a video link (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/theme/normalize", post(theme::normalize_theme))
        .route("/theme/style", post(theme::resolve_theme_style))
        .route("/profile/view", post(profile::build_view))
        .route("/video/classify", get(video::classify_url))
}
