//! The oil library facade.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::error::{LibraryError, LibraryResult};
use ol_assay::{AssayStore, RawAssayRecord, ScalarKind, normalize_identifier};
use ol_estimate::{EstimationParams, Estimator, ResolvedOilProperties};

/// Name-keyed access to resolved oil properties.
///
/// One lookup per oil: the first `resolve` for a name fetches the raw
/// record, normalizes it and runs the full estimation pipeline; the
/// result is cached and every later call for the same normalized name
/// returns the same shared value. Resolutions run under the cache lock,
/// so concurrent first accesses to one name do the work exactly once.
pub struct OilLibrary {
    store: Box<dyn AssayStore>,
    estimator: Estimator,
    cache: Mutex<HashMap<String, Arc<ResolvedOilProperties>>>,
}

impl OilLibrary {
    pub fn new(store: impl AssayStore + 'static) -> Self {
        Self::with_params(store, EstimationParams::default())
    }

    pub fn with_params(store: impl AssayStore + 'static, params: EstimationParams) -> Self {
        Self {
            store: Box::new(store),
            estimator: Estimator::new(params),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve an oil by name.
    ///
    /// Names are matched whitespace-trimmed and case-insensitively.
    /// Failures are not cached: a store that later gains the record, or
    /// a record fixed after invalidation, resolves fresh on retry.
    pub fn resolve(&self, name: &str) -> LibraryResult<Arc<ResolvedOilProperties>> {
        let key = normalize_identifier(name);

        let mut cache = self.lock_cache();
        if let Some(props) = cache.get(&key) {
            debug!(oil = %key, "resolved from cache");
            return Ok(Arc::clone(props));
        }

        let fields = self
            .store
            .fetch_raw_record(&key)
            .ok_or_else(|| LibraryError::OilNotFound {
                identifier: key.clone(),
            })?;

        let record = RawAssayRecord::from_fields(&fields)?;
        let props = Arc::new(self.estimator.resolve(&record)?);
        info!(oil = %key, "resolved oil properties");
        if !props.flags().is_empty() {
            warn!(oil = %key, flags = ?props.flags(), "resolution carries data-quality flags");
        }

        cache.insert(key, Arc::clone(&props));
        Ok(props)
    }

    /// The scalar and derived point values for an oil, for callers that
    /// never query the continuous curves. Served from the same cache.
    pub fn scalar_properties(&self, name: &str) -> LibraryResult<BTreeMap<ScalarKind, f64>> {
        Ok(self.resolve(name)?.scalars().clone())
    }

    /// The normalized record for an oil, without estimation.
    pub fn raw_record(&self, name: &str) -> LibraryResult<RawAssayRecord> {
        let key = normalize_identifier(name);
        let fields = self
            .store
            .fetch_raw_record(&key)
            .ok_or_else(|| LibraryError::OilNotFound { identifier: key })?;
        Ok(RawAssayRecord::from_fields(&fields)?)
    }

    /// Drop the cached resolution for one oil, if any. The next
    /// `resolve` for that name re-fetches and re-estimates.
    pub fn invalidate(&self, name: &str) -> bool {
        let key = normalize_identifier(name);
        let removed = self.lock_cache().remove(&key).is_some();
        if removed {
            debug!(oil = %key, "invalidated cached resolution");
        }
        removed
    }

    /// Drop every cached resolution.
    pub fn clear(&self) {
        self.lock_cache().clear();
    }

    /// Number of oils currently cached.
    pub fn cached_count(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn params(&self) -> &EstimationParams {
        self.estimator.params()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<ResolvedOilProperties>>> {
        // A panic mid-resolution leaves no partial state in the map, so
        // a poisoned lock is still a valid cache.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for OilLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OilLibrary")
            .field("cached", &self.cached_count())
            .finish_non_exhaustive()
    }
}
