//! All-pairs nearest-bundle search between two collections.
//!
//! For every bundle of the first collection, the matcher finds the bundle of
//! the second collection with the smallest
//! [aggregate distance](crate::aggregate::bundle_distance).
//!
//! # Algorithm
//!
//! 1. Resample every tract of both collections to a fixed sample count.
//! 2. Reset the shared [`Progress`] to `|metrics| · curves₁ · curves₂`.
//! 3. For each first-collection bundle `i` (in parallel), scan the second
//!    collection in order and keep the first strictly smaller distance.
//!
//! Each outer iteration owns its result slot, so no locking is needed. The
//! progress counter is the only shared mutable state. Workers add one batch
//! of ticks per bundle pair, and each search reports into a counter of its
//! own. The inner scan is sequential, so ties resolve to the lowest
//! candidate index regardless of thread count.
//!
//! # Example
//!
//! ```
//! use tractum::{Bundle, MatchConfig, Point3, TractMatcher};
//! use tractum::metric::EuclideanMean;
//!
//! let tract = |x: f64| vec![Point3::new(x, 0.0, 0.0), Point3::new(x + 1.0, 0.0, 0.0)];
//!
//! let queries = vec![Bundle::new(vec![tract(0.0)]), Bundle::new(vec![tract(9.0)])];
//! let atlas = vec![Bundle::new(vec![tract(10.0)]), Bundle::new(vec![tract(0.0)])];
//!
//! let mut matcher = TractMatcher::new(MatchConfig::default()).with_metric(EuclideanMean);
//! let result = matcher.match_bundles(&queries, &atlas).unwrap();
//!
//! assert_eq!(result.indices(), &[Some(1), Some(0)]);
//! assert_eq!(result.distances()[0], 0.0);
//! ```

mod config;
mod result;

pub use config::{MatchConfig, NumericPolicy, DEFAULT_RESAMPLE_COUNT};
pub use result::MatchResult;

use crate::aggregate::{aggregate, comparison_count};
use crate::error::{Result, TractError};
use crate::metric::Metric;
use crate::progress::{CancellationToken, Progress};
use crate::resample::resample_collection;
use crate::tract::{Bundle, ResampledBundle};
use log::{debug, info, warn};
use num_traits::Float;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use result::Slot;
use std::sync::Arc;
use std::time::Instant;

/// Reusable nearest-bundle matcher.
///
/// Holds the metric set and configuration, which may be reused across calls,
/// and the [`Progress`] reported by [`match_bundles`](Self::match_bundles).
/// Search state is created per call.
pub struct TractMatcher<F: Float> {
    metrics: Vec<Box<dyn Metric<F>>>,
    config: MatchConfig,
    progress: Arc<Progress>,
    cancel: Option<CancellationToken>,
}

impl<F: Float + Send + Sync + 'static> TractMatcher<F> {
    /// Creates a matcher with no metrics.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            metrics: Vec::new(),
            config,
            progress: Arc::new(Progress::new()),
            cancel: None,
        }
    }

    /// Adds a metric to the set.
    pub fn with_metric<M: Metric<F> + 'static>(mut self, metric: M) -> Self {
        self.metrics.push(Box::new(metric));
        self
    }

    /// Adds several boxed metrics to the set.
    pub fn with_metrics<I>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Metric<F>>>,
    {
        self.metrics.extend(metrics);
        self
    }

    /// Attaches a token that stops the search early once cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn push_metric(&mut self, metric: Box<dyn Metric<F>>) {
        self.metrics.push(metric);
    }

    pub fn metrics(&self) -> &[Box<dyn Metric<F>>] {
        &self.metrics
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Progress of the current or last [`match_bundles`](Self::match_bundles)
    /// call. Clone the `Arc` before the call to poll it from another thread.
    pub fn progress(&self) -> Arc<Progress> {
        Arc::clone(&self.progress)
    }

    /// Finds the best match in `candidates` for every bundle of `queries`.
    ///
    /// Takes `&mut self` so that only one search at a time reports into the
    /// matcher's own [`Progress`]. Use
    /// [`match_with_progress`](Self::match_with_progress) to run several
    /// searches on a shared matcher.
    ///
    /// # Arguments
    ///
    /// * `queries` - First collection; one result slot per bundle
    /// * `candidates` - Second collection, searched in order for each query
    ///
    /// # Returns
    ///
    /// A [`MatchResult`] index-aligned with `queries`.
    ///
    /// # Errors
    ///
    /// - [`TractError::NoMetricSelected`] if the metric set is empty. Nothing
    ///   is resampled or compared in that case.
    /// - [`TractError::InvalidResampleCount`] if the configured count is < 2.
    /// - [`TractError::NonFiniteDistance`] under [`NumericPolicy::Reject`].
    /// - [`TractError::ThreadPool`] if a dedicated pool cannot be built.
    ///
    /// Cancellation is not an error: the call returns the slots finished so
    /// far, and [`MatchResult::is_complete`] reports false.
    pub fn match_bundles(
        &mut self,
        queries: &[Bundle<F>],
        candidates: &[Bundle<F>],
    ) -> Result<MatchResult<F>> {
        let progress = Arc::clone(&self.progress);
        self.match_with_progress(queries, candidates, &progress)
    }

    /// Like [`match_bundles`](Self::match_bundles), but reports into a
    /// caller-owned counter.
    ///
    /// The counter is reset to this search's total before any comparison
    /// runs. Concurrent searches on one matcher must each pass their own.
    ///
    /// # Arguments
    ///
    /// * `queries` - First collection; one result slot per bundle
    /// * `candidates` - Second collection, searched in order for each query
    /// * `progress` - Counter for this search only
    ///
    /// # Errors
    ///
    /// Same as [`match_bundles`](Self::match_bundles).
    pub fn match_with_progress(
        &self,
        queries: &[Bundle<F>],
        candidates: &[Bundle<F>],
        progress: &Progress,
    ) -> Result<MatchResult<F>> {
        search(
            queries,
            candidates,
            &self.metrics,
            &self.config,
            progress,
            self.cancel.as_ref(),
        )
    }
}

/// One-shot search with a borrowed metric set and default settings apart
/// from the resample count.
///
/// # Arguments
///
/// * `queries` - First collection; one result slot per bundle
/// * `candidates` - Second collection
/// * `metrics` - Non-empty metric set
/// * `resample_count` - Samples per curve, at least 2
///
/// # Example
///
/// ```
/// use tractum::{match_bundles, Bundle, Point3};
/// use tractum::metric::EuclideanMean;
///
/// let bundle = Bundle::new(vec![vec![Point3::new(0.0_f32, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]]);
/// let result = match_bundles(&[bundle.clone()], &[bundle], &[EuclideanMean], 12).unwrap();
/// assert_eq!(result.best(0), Some((0, 0.0)));
/// ```
pub fn match_bundles<F, M>(
    queries: &[Bundle<F>],
    candidates: &[Bundle<F>],
    metrics: &[M],
    resample_count: usize,
) -> Result<MatchResult<F>>
where
    F: Float + Send + Sync,
    M: Metric<F>,
{
    let config = MatchConfig::new().with_resample_count(resample_count);
    search(queries, candidates, metrics, &config, &Progress::new(), None)
}

fn search<F, M>(
    queries: &[Bundle<F>],
    candidates: &[Bundle<F>],
    metrics: &[M],
    config: &MatchConfig,
    progress: &Progress,
    cancel: Option<&CancellationToken>,
) -> Result<MatchResult<F>>
where
    F: Float + Send + Sync,
    M: Metric<F>,
{
    if metrics.is_empty() {
        return Err(TractError::NoMetricSelected);
    }
    config.validate()?;

    let start = Instant::now();
    let resampled_queries =
        resample_collection(queries, config.resample_count, config.resample_mode);
    let resampled_candidates =
        resample_collection(candidates, config.resample_count, config.resample_mode);

    let query_curves: usize = resampled_queries.iter().map(ResampledBundle::len).sum();
    let candidate_curves: usize = resampled_candidates.iter().map(ResampledBundle::len).sum();
    let total = comparison_count(query_curves, candidate_curves, metrics.len());
    progress.reset(total);

    debug!(
        "resampled {} + {} bundles ({} + {} curves, {} samples each) in {:?}; {} comparisons over {} metrics",
        queries.len(),
        candidates.len(),
        query_curves,
        candidate_curves,
        config.resample_count,
        start.elapsed(),
        total,
        metrics.len()
    );

    let runner = Search {
        candidates: &resampled_candidates,
        metrics,
        reject_non_finite: config.numeric_policy == NumericPolicy::Reject,
        progress,
        cancel,
    };
    let slots = runner.run(&resampled_queries, config.threads)?;
    let result = MatchResult::from_slots(slots);

    if result.is_complete() {
        info!(
            "matched {} bundles against {} candidates in {:?}",
            result.len(),
            candidates.len(),
            start.elapsed()
        );
    } else {
        warn!(
            "search cancelled: {} of {} bundles unfinished ({} of {} comparisons done)",
            result.incomplete().count(),
            result.len(),
            progress.value(),
            total
        );
    }

    Ok(result)
}

/// Borrowed state shared by all outer-loop workers.
struct Search<'a, F, M> {
    candidates: &'a [ResampledBundle<F>],
    metrics: &'a [M],
    reject_non_finite: bool,
    progress: &'a Progress,
    cancel: Option<&'a CancellationToken>,
}

impl<F, M> Search<'_, F, M>
where
    F: Float + Send + Sync,
    M: Metric<F>,
{
    #[cfg(feature = "parallel")]
    fn run(&self, queries: &[ResampledBundle<F>], threads: Option<usize>) -> Result<Vec<Slot<F>>> {
        let task = || {
            queries
                .par_iter()
                .enumerate()
                .map(|(i, query)| self.best_match(i, query))
                .collect::<Result<Vec<_>>>()
        };

        match threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| TractError::ThreadPool(e.to_string()))?;
                pool.install(task)
            }
            None => task(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run(&self, queries: &[ResampledBundle<F>], threads: Option<usize>) -> Result<Vec<Slot<F>>> {
        if let Some(n) = threads {
            debug!("ignoring thread count {n}: built without the `parallel` feature");
        }
        queries
            .iter()
            .enumerate()
            .map(|(i, query)| self.best_match(i, query))
            .collect()
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancellationToken::is_cancelled)
    }

    /// Scans every candidate for bundle `i`. A cancelled scan returns the
    /// sentinel rather than a partial minimum.
    fn best_match(&self, i: usize, query: &ResampledBundle<F>) -> Result<Slot<F>> {
        let mut slot = Slot::pending();

        for (j, candidate) in self.candidates.iter().enumerate() {
            if self.is_cancelled() {
                return Ok(Slot::pending());
            }

            let d = aggregate(
                query.curves(),
                candidate.curves(),
                self.metrics,
                self.reject_non_finite,
            )
            .map_err(|metric| TractError::NonFiniteDistance {
                bundle: i,
                candidate: j,
                metric,
            })?;
            self.progress
                .add(comparison_count(query.len(), candidate.len(), self.metrics.len()));

            if d < slot.distance {
                slot.distance = d;
                slot.index = Some(j);
            }
        }

        slot.complete = true;
        Ok(slot)
    }
}
