use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tracing::{error, info};

use super::{ArtifactError, ModelArtifacts};

type Loader = Box<dyn Fn() -> Result<ModelArtifacts, ArtifactError> + Send + Sync>;
type LoadResult = Result<Arc<ModelArtifacts>, Arc<ArtifactError>>;

/// Load-once holder for the model artifacts.
///
/// The first caller runs the loader; concurrent callers block until it finishes and then
/// share the result. A failed load is cached as well, so a process started with bad
/// artifacts keeps refusing to score until it is restarted.
pub struct ArtifactStore {
    loader: Option<Loader>,
    cell: OnceLock<LoadResult>,
}

impl ArtifactStore {
    /// Lazily load the artifact set from `dir` on first access.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::with_loader(move || {
            info!(dir = %dir.display(), "loading model artifacts");
            ModelArtifacts::load_dir(&dir)
        })
    }

    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn() -> Result<ModelArtifacts, ArtifactError> + Send + Sync + 'static,
    {
        Self {
            loader: Some(Box::new(loader)),
            cell: OnceLock::new(),
        }
    }

    /// Wrap an artifact set that has already been built in memory.
    pub fn preloaded(artifacts: ModelArtifacts) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Ok(Arc::new(artifacts)));
        Self { loader: None, cell }
    }

    /// Return the shared artifacts, loading them on first use.
    pub fn get(&self) -> LoadResult {
        self.cell
            .get_or_init(|| {
                let outcome = match &self.loader {
                    Some(load) => load(),
                    None => Err(ArtifactError::NoSource),
                };

                match outcome {
                    Ok(artifacts) => {
                        info!(
                            features = artifacts.feature_names().len(),
                            "model artifacts loaded"
                        );
                        Ok(Arc::new(artifacts))
                    }
                    Err(err) => {
                        error!(error = %err, "model artifacts failed to load");
                        Err(Arc::new(err))
                    }
                }
            })
            .clone()
    }

    /// True once a load has been attempted and succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }
}

impl fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.cell.get() {
            None => "pending",
            Some(Ok(_)) => "loaded",
            Some(Err(_)) => "failed",
        };
        f.debug_struct("ArtifactStore")
            .field("state", &state)
            .finish()
    }
}
