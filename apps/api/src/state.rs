use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::analysis::ChartRenderer;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only tables loaded at startup.
    pub store: Arc<Store>,
    /// Pluggable chart backend. Default: PieChartRenderer (SVG via plotters).
    pub chart: Arc<dyn ChartRenderer>,
    /// Signs the session cookie.
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
