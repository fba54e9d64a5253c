//! Application state shared by the axum handlers.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mapquery_lib::{
    load_osm, Error as LibError, MapConfig, MapIndex, PrefixIndex, SpatialGraph,
};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The OSM extract does not exist.
    DatasetNotFound(String),

    /// The extract exists but could not be turned into a map.
    MapLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetNotFound(path) => write!(f, "map data not found: {path}"),
            Self::MapLoad(e) => write!(f, "failed to load map data: {e}"),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MapLoad(e) => Some(e),
            Self::DatasetNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::DatasetNotFound { path } => {
                Self::DatasetNotFound(path.display().to_string())
            }
            other => Self::MapLoad(other),
        }
    }
}

/// Shared application state, cheap to clone.
///
/// ```ignore
/// use axum::{extract::State, routing::get, Router};
/// use mapquery_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let vertices = state.map().graph().vertex_count();
/// }
///
/// let state = AppState::load("map.osm.pbf", &MapConfig::default())?;
/// let app = Router::new().route("/", get(handler)).with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    map: MapIndex,
    loaded_at: DateTime<Utc>,
}

impl AppState {
    /// Load the map from an OSM PBF extract.
    pub fn load(path: impl AsRef<Path>, config: &MapConfig) -> Result<Self, AppStateError> {
        let map = load_osm(path.as_ref(), config)?;
        tracing::info!(
            vertices = map.graph().vertex_count(),
            names = map.names().len(),
            "map data loaded successfully"
        );

        Ok(Self::from_index(map))
    }

    pub fn from_index(map: MapIndex) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                map,
                loaded_at: Utc::now(),
            }),
        }
    }

    /// Build state from pre-built components, for tests and embedded data.
    pub fn from_components(
        graph: SpatialGraph,
        names: PrefixIndex,
        config: MapConfig,
    ) -> Result<Self, AppStateError> {
        let map = MapIndex::new(graph, names, config)?;
        Ok(Self::from_index(map))
    }

    pub fn map(&self) -> &MapIndex {
        &self.inner.map
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.inner.loaded_at
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let map = &self.inner.map;
        f.debug_struct("AppState")
            .field("vertices", &map.graph().vertex_count())
            .field("names", &map.names().len())
            .field("loaded_at", &self.inner.loaded_at.to_rfc3339())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapquery_lib::{GraphBuilder, Location, Vertex};

    #[test]
    fn from_components_exposes_the_map() {
        let mut builder = GraphBuilder::new();
        builder.register(Vertex::new(1, 37.87, -122.26));
        let mut names = PrefixIndex::new();
        names.insert(Location::new(1, "Soda Hall", 37.87, -122.26));

        let state = AppState::from_components(builder.build(), names, MapConfig::default())
            .expect("default config is valid");

        assert_eq!(state.map().graph().vertex_count(), 1);
        assert_eq!(state.map().names().len(), 1);
        assert!(format!("{state:?}").contains("vertices: 1"));
    }

    #[test]
    fn missing_dataset_is_reported() {
        let err = AppState::load("/nonexistent/map.osm.pbf", &MapConfig::default())
            .expect_err("file does not exist");
        assert!(matches!(err, AppStateError::DatasetNotFound(_)));
    }

    #[test]
    fn invalid_config_is_a_load_error() {
        let config = MapConfig::default().with_max_depth(40);
        let err = AppState::from_components(SpatialGraph::default(), PrefixIndex::new(), config)
            .expect_err("depth 40 is unsupported");
        assert!(matches!(
            err,
            AppStateError::MapLoad(LibError::UnsupportedDepth { .. })
        ));
    }
}
