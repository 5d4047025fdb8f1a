//! The single-process online training loop.
//!
//! The trainer wires together a parameter store, a resolved updater, and
//! a loss. Each training example flows through score → gradient signal →
//! in-place update; the loop itself holds no learning state beyond the
//! global step counter.
//!
//! Dataset capacity is validated once, before the first epoch; the
//! per-example path performs no checks. Prediction is a pure read and is
//! parallelized over rows for batches.

use rayon::prelude::*;
use tracing::{debug, info};

use sparselin_core::{OptimizerConfig, SparseRow};
use sparselin_optimizer::{compute_score, create_updater, UpdaterDyn};
use sparselin_store::{ParameterStore, Result as StoreResult};

use crate::loss::Loss;
use crate::metrics::{Metrics, MetricsRecorder};

/// A labelled training example.
pub type Example = (SparseRow, f32);

/// Online trainer for a linear model.
///
/// # Example
///
/// ```
/// use sparselin_core::OptimizerConfig;
/// use sparselin_training::{LogisticLoss, Trainer};
///
/// let config = OptimizerConfig::from_name("adagrad", 0.1, 0.0).unwrap();
/// let mut trainer = Trainer::new(&config, 100, Box::new(LogisticLoss));
///
/// let dataset = vec![
///     (vec![(3, 1.0)].into(), 1.0),
///     (vec![(7, 1.0)].into(), -1.0),
/// ];
/// let reports = trainer.fit(&dataset, 5).unwrap();
/// assert_eq!(reports.len(), 5);
/// ```
pub struct Trainer {
    store: ParameterStore,
    updater: Box<dyn UpdaterDyn + Send + Sync>,
    loss: Box<dyn Loss>,
    global_step: u64,
}

impl Trainer {
    /// Creates a trainer with a fresh zero-initialized store sized for
    /// `num_features` features.
    ///
    /// The store width and the update rule both derive from the same
    /// configuration, so they cannot disagree.
    pub fn new(config: &OptimizerConfig, num_features: usize, loss: Box<dyn Loss>) -> Self {
        let store = ParameterStore::new(num_features, config.variant);
        let updater = create_updater(config);
        Self {
            store,
            updater,
            loss,
            global_step: 0,
        }
    }

    /// Creates a trainer from an existing store and updater, e.g. to
    /// continue training a warm model.
    ///
    /// # Errors
    ///
    /// Returns [`sparselin_store::StoreError::WidthMismatch`] if the
    /// store's slot width doesn't match the updater's variant.
    pub fn from_parts(
        store: ParameterStore,
        updater: Box<dyn UpdaterDyn + Send + Sync>,
        loss: Box<dyn Loss>,
    ) -> StoreResult<Self> {
        store.check_width(updater.slot_width())?;
        Ok(Self {
            store,
            updater,
            loss,
            global_step: 0,
        })
    }

    /// Runs `num_epochs` passes over the dataset and returns one metrics
    /// snapshot per epoch.
    ///
    /// Every row is validated against the store's capacity once, up
    /// front; the training loop itself is check-free.
    ///
    /// # Errors
    ///
    /// Returns [`sparselin_store::StoreError::CapacityExceeded`] if any
    /// row references a feature id the store wasn't sized for.
    pub fn fit(&mut self, dataset: &[Example], num_epochs: usize) -> StoreResult<Vec<Metrics>> {
        for (row, _) in dataset {
            self.store.ensure_fits(row)?;
        }
        debug!(
            examples = dataset.len(),
            num_features = self.store.num_features(),
            optimizer = self.updater.config().variant.as_key(),
            loss = self.loss.name(),
            "dataset validated"
        );

        let mut reports = Vec::with_capacity(num_epochs);
        for epoch in 0..num_epochs {
            let metrics = self.train_epoch(dataset);
            info!(
                epoch,
                global_step = metrics.global_step,
                avg_loss = metrics.loss,
                accuracy = metrics.accuracy,
                "epoch complete"
            );
            reports.push(metrics);
        }
        Ok(reports)
    }

    /// Runs one pass over the dataset without capacity validation.
    ///
    /// Rows must fit the store; [`Trainer::fit`] validates and loops.
    pub fn train_epoch(&mut self, dataset: &[Example]) -> Metrics {
        let mut recorder = MetricsRecorder::new();
        for (row, label) in dataset {
            let score = compute_score(row, &self.store);
            let pg = self.loss.gradient(score, *label);
            self.updater.apply_gradient(row, &mut self.store, pg);
            self.global_step += 1;

            recorder.record_example(
                self.loss.loss(score, *label) as f64,
                self.loss.correct(score, *label),
            );
        }
        recorder.aggregate(self.global_step)
    }

    /// Scores a single row against the current model.
    pub fn predict(&self, row: &SparseRow) -> f32 {
        compute_score(row, &self.store)
    }

    /// Scores a batch of rows in parallel.
    ///
    /// Prediction only reads the store, so rows are scored concurrently
    /// over a shared immutable borrow.
    pub fn predict_batch(&self, rows: &[SparseRow]) -> Vec<f32> {
        let store = &self.store;
        rows.par_iter().map(|row| compute_score(row, store)).collect()
    }

    /// Returns the trained parameter store.
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    /// Consumes the trainer, yielding the parameter store.
    pub fn into_store(self) -> ParameterStore {
        self.store
    }

    /// Returns the number of examples processed so far.
    pub fn global_step(&self) -> u64 {
        self.global_step
    }
}
