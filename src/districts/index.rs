//! Lazily loaded, memoized district list.

use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::{DistrictSource, LoadError};

/// One fetch of the source, shared by every caller that arrives while it runs.
type Attempt = Shared<BoxFuture<'static, Result<Arc<Vec<String>>, Arc<LoadError>>>>;

/// The full district identifier list, loaded from its source at most once.
///
/// Concurrent callers that arrive while a load is in flight wait for that
/// load instead of starting their own, and all of them see its outcome. A
/// failed load is not cached, so the next call retries.
pub struct DistrictIndex {
    source: Arc<dyn DistrictSource>,
    districts: OnceCell<Arc<Vec<String>>>,
    in_flight: Mutex<Option<Attempt>>,
}

impl DistrictIndex {
    pub fn new<S: DistrictSource + 'static>(source: S) -> Self {
        Self::from_boxed(Box::new(source))
    }

    pub fn from_boxed(source: Box<dyn DistrictSource>) -> Self {
        Self {
            source: Arc::from(source),
            districts: OnceCell::new(),
            in_flight: Mutex::new(None),
        }
    }

    /// Load the list, or an empty slice if the source is unavailable.
    pub async fn load(&self) -> &[String] {
        match self.try_load().await {
            Ok(districts) => districts,
            Err(e) => {
                warn!(
                    "Failed to load districts from {}: {}",
                    self.source.describe(),
                    e
                );
                &[]
            }
        }
    }

    /// Load the list, surfacing the failure.
    ///
    /// Callers that joined the same attempt share one error value.
    pub async fn try_load(&self) -> Result<&[String], Arc<LoadError>> {
        if let Some(districts) = self.districts.get() {
            return Ok(districts.as_slice());
        }

        let attempt = self.join_or_start();
        let result = match attempt.clone().await {
            Ok(districts) => Ok(self
                .districts
                .get_or_init(|| async { districts })
                .await
                .as_slice()),
            Err(e) => Err(e),
        };
        self.finish(&attempt);
        result
    }

    /// The list if a load has already succeeded
    pub fn loaded(&self) -> Option<&[String]> {
        self.districts.get().map(|districts| districts.as_slice())
    }

    fn join_or_start(&self) -> Attempt {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(attempt) = in_flight.as_ref() {
            return attempt.clone();
        }

        let source = Arc::clone(&self.source);
        let attempt = async move {
            let districts = source.fetch().await.map_err(Arc::new)?;
            info!(
                "Loaded {} districts from {}",
                districts.len(),
                source.describe()
            );
            Ok(Arc::new(districts))
        }
        .boxed()
        .shared();

        *in_flight = Some(attempt.clone());
        attempt
    }

    /// Forget a completed attempt so the next call after a failure refetches.
    /// A newer attempt started in the meantime is left alone.
    fn finish(&self, attempt: &Attempt) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight.as_ref().is_some_and(|current| current.ptr_eq(attempt)) {
            *in_flight = None;
        }
    }
}
