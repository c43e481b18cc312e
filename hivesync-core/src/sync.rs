//! Sync layer coordinating the API client and the snapshot store
//!
//! [`SyncClient`] owns the transport and a shared [`Store`], and enforces the
//! lifecycle the records system expects: every collection is a read-through
//! snapshot, every successful write is followed by a full reload of the
//! affected collection (consistency by re-fetch, never by local patch), and
//! referential checks run client-side before any network call because the
//! storage backend enforces nothing.

use std::sync::Arc;

use crate::api::{Action, ApiClient};
use crate::config::{ApiConfig, Config, SyncConfig};
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{
    Collection, Hive, NewApiary, NewHive, NewInspection, NewMetric, NewTask, Task,
};

/// Result of loading all collections.
///
/// A failing collection is recorded here instead of aborting its siblings;
/// its cache is left empty, degrading that view only.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Record counts per successfully loaded collection
    pub loaded: Vec<(Collection, usize)>,
    /// Errors encountered (collection → error message)
    pub errors: Vec<(Collection, String)>,
}

impl LoadReport {
    /// True when every collection loaded.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total records across all loaded collections.
    pub fn total_records(&self) -> usize {
        self.loaded.iter().map(|(_, n)| n).sum()
    }

    fn record(&mut self, collection: Collection, outcome: &Result<usize>) {
        match outcome {
            Ok(count) => self.loaded.push((collection, *count)),
            Err(e) => self.errors.push((collection, e.to_string())),
        }
    }
}

/// Coordinates loads and mutations against the remote records API.
pub struct SyncClient {
    api: ApiClient,
    store: Arc<Store>,
    sync_config: SyncConfig,
}

impl SyncClient {
    /// Create a sync client from the full application config.
    pub fn from_config(config: &Config, store: Arc<Store>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(&config.api)?,
            store,
            sync_config: config.sync.clone(),
        })
    }

    /// Create a sync client with explicit API settings.
    pub fn new(api_config: &ApiConfig, store: Arc<Store>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(api_config)?,
            store,
            sync_config: SyncConfig::default(),
        })
    }

    /// The shared store this client fills.
    pub fn store(&self) -> &Store {
        &self.store
    }

    // ============================================
    // Read path
    // ============================================

    /// Load apiaries, replacing the cached snapshot.
    ///
    /// On failure the snapshot is emptied and the error propagates.
    pub async fn load_apiaries(&self) -> Result<usize> {
        match self.api.fetch_records(Collection::Apiaries).await {
            Ok(records) => {
                let count = records.len();
                self.store.replace_apiaries(records);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load apiaries");
                self.store.clear(Collection::Apiaries);
                Err(e)
            }
        }
    }

    /// Load hives, replacing the cached snapshot.
    pub async fn load_hives(&self) -> Result<usize> {
        match self.api.fetch_records(Collection::Hives).await {
            Ok(records) => {
                let count = records.len();
                self.store.replace_hives(records);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load hives");
                self.store.clear(Collection::Hives);
                Err(e)
            }
        }
    }

    /// Load inspections, replacing the cached snapshot.
    pub async fn load_inspections(&self) -> Result<usize> {
        match self.api.fetch_records(Collection::Inspections).await {
            Ok(records) => {
                let count = records.len();
                self.store.replace_inspections(records);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load inspections");
                self.store.clear(Collection::Inspections);
                Err(e)
            }
        }
    }

    /// Load metrics, replacing the cached snapshot.
    pub async fn load_metrics(&self) -> Result<usize> {
        match self.api.fetch_records(Collection::Metrics).await {
            Ok(records) => {
                let count = records.len();
                self.store.replace_metrics(records);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load metrics");
                self.store.clear(Collection::Metrics);
                Err(e)
            }
        }
    }

    /// Load tasks, replacing the cached snapshot.
    pub async fn load_tasks(&self) -> Result<usize> {
        match self.api.fetch_records(Collection::Tasks).await {
            Ok(records) => {
                let count = records.len();
                self.store.replace_tasks(records);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load tasks");
                self.store.clear(Collection::Tasks);
                Err(e)
            }
        }
    }

    /// Load all five collections concurrently.
    ///
    /// Failures are collected per collection; siblings are neither aborted
    /// nor rolled back.
    pub async fn load_all(&self) -> LoadReport {
        let (apiaries, hives, inspections, metrics, tasks) = tokio::join!(
            self.load_apiaries(),
            self.load_hives(),
            self.load_inspections(),
            self.load_metrics(),
            self.load_tasks(),
        );

        let mut report = LoadReport::default();
        report.record(Collection::Apiaries, &apiaries);
        report.record(Collection::Hives, &hives);
        report.record(Collection::Inspections, &inspections);
        report.record(Collection::Metrics, &metrics);
        report.record(Collection::Tasks, &tasks);

        tracing::info!(
            loaded = report.total_records(),
            failed = report.errors.len(),
            "Load all complete"
        );
        report
    }

    /// Apiaries-first load for fresh deployments.
    ///
    /// Loads apiaries, seeds a default apiary when the sheet is empty and the
    /// config asks for one, then loads the remaining collections
    /// concurrently. The apiaries load must succeed; without it every hive
    /// would fail its referential check.
    pub async fn bootstrap(&self) -> Result<LoadReport> {
        let apiary_count = self.load_apiaries().await?;

        if apiary_count == 0 && self.sync_config.bootstrap_default_apiary {
            tracing::info!(
                name = %self.sync_config.default_apiary_name,
                "No apiaries found, creating default"
            );
            self.add_apiary(NewApiary::named(self.sync_config.default_apiary_name.clone()))
                .await?;
        }

        let (hives, inspections, metrics, tasks) = tokio::join!(
            self.load_hives(),
            self.load_inspections(),
            self.load_metrics(),
            self.load_tasks(),
        );

        let mut report = LoadReport::default();
        report
            .loaded
            .push((Collection::Apiaries, self.store.len(Collection::Apiaries)));
        report.record(Collection::Hives, &hives);
        report.record(Collection::Inspections, &inspections);
        report.record(Collection::Metrics, &metrics);
        report.record(Collection::Tasks, &tasks);
        Ok(report)
    }

    /// Check whether the endpoint is reachable and answering.
    pub async fn health(&self) -> Result<bool> {
        self.api.health().await
    }

    // ============================================
    // Write path
    // ============================================

    /// Create an apiary, then reload the apiaries snapshot.
    pub async fn add_apiary(&self, apiary: NewApiary) -> Result<()> {
        let record = serde_json::to_value(&apiary)?;
        self.api
            .write(Action::Add, Collection::Apiaries, record, None)
            .await?;
        self.load_apiaries().await?;
        Ok(())
    }

    /// Create a hive, then reload the hives snapshot.
    ///
    /// Rejected client-side when `apiary_id` does not reference a cached
    /// apiary; no request is issued.
    pub async fn add_hive(&self, hive: NewHive) -> Result<()> {
        if !self.store.apiary_exists(hive.apiary_id) {
            return Err(Error::Validation(format!(
                "cannot add hive '{}': apiary {} does not exist; select an apiary first",
                hive.name, hive.apiary_id
            )));
        }

        let record = serde_json::to_value(&hive)?;
        self.api
            .write(Action::Add, Collection::Hives, record, None)
            .await?;
        self.load_hives().await?;
        Ok(())
    }

    /// Record an inspection, then reload the inspections snapshot.
    pub async fn add_inspection(&self, inspection: NewInspection) -> Result<()> {
        if !self.store.hive_exists(inspection.hive_id) {
            return Err(Error::Validation(format!(
                "cannot record inspection: hive {} does not exist; select a hive first",
                inspection.hive_id
            )));
        }

        let record = serde_json::to_value(&inspection)?;
        self.api
            .write(Action::Add, Collection::Inspections, record, None)
            .await?;
        self.load_inspections().await?;
        Ok(())
    }

    /// Record a metric reading, then reload the metrics snapshot.
    ///
    /// An unspecified source defaults to Manual on the outgoing record.
    pub async fn add_metric(&self, metric: NewMetric) -> Result<()> {
        if !self.store.hive_exists(metric.hive_id) {
            return Err(Error::Validation(format!(
                "cannot record metric: hive {} does not exist; select a hive first",
                metric.hive_id
            )));
        }

        let mut record = serde_json::to_value(&metric)?;
        if metric.source.is_none() {
            record["Source"] = serde_json::Value::String("Manual".to_string());
        }
        self.api
            .write(Action::Add, Collection::Metrics, record, None)
            .await?;
        self.load_metrics().await?;
        Ok(())
    }

    /// Create a task, then reload the tasks snapshot.
    ///
    /// New tasks always start Pending regardless of caller input; the
    /// optional hive reference is validated when present.
    pub async fn add_task(&self, task: NewTask) -> Result<()> {
        if let Some(hive_id) = task.hive_id {
            if !self.store.hive_exists(hive_id) {
                return Err(Error::Validation(format!(
                    "cannot add task '{}': hive {} does not exist",
                    task.title, hive_id
                )));
            }
        }

        let mut record = serde_json::to_value(&task)?;
        record["Status"] = serde_json::Value::String("Pending".to_string());
        self.api
            .write(Action::Add, Collection::Tasks, record, None)
            .await?;
        self.load_tasks().await?;
        Ok(())
    }

    /// Update a hive record, then reload the hives snapshot.
    pub async fn update_hive(&self, hive: &Hive) -> Result<()> {
        if !self.store.apiary_exists(hive.apiary_id) {
            return Err(Error::Validation(format!(
                "cannot update hive {}: apiary {} does not exist",
                hive.id, hive.apiary_id
            )));
        }

        let record = serde_json::to_value(hive)?;
        self.api
            .write(Action::Update, Collection::Hives, record, Some(hive.id))
            .await?;
        self.load_hives().await?;
        Ok(())
    }

    /// Update a task record, then reload the tasks snapshot.
    pub async fn update_task(&self, task: &Task) -> Result<()> {
        let record = serde_json::to_value(task)?;
        self.api
            .write(Action::Update, Collection::Tasks, record, Some(task.id))
            .await?;
        self.load_tasks().await?;
        Ok(())
    }

    /// Delete an apiary, then reload the apiaries snapshot.
    ///
    /// The backend has no cascading delete, so an apiary that still has
    /// hives is rejected client-side with no request sent — deleting it
    /// would orphan the hive rows.
    pub async fn delete_apiary(&self, apiary_id: i64) -> Result<()> {
        let dependents = self.store.hives_in_apiary(apiary_id);
        if !dependents.is_empty() {
            return Err(Error::Validation(format!(
                "cannot delete apiary {}: {} hive(s) still reference it; move or delete them first",
                apiary_id,
                dependents.len()
            )));
        }

        let record = serde_json::json!({ "ID": apiary_id });
        self.api
            .write(Action::Delete, Collection::Apiaries, record, Some(apiary_id))
            .await?;
        self.load_apiaries().await?;
        Ok(())
    }

    /// Delete a hive, then reload the hives snapshot.
    pub async fn delete_hive(&self, hive_id: i64) -> Result<()> {
        let record = serde_json::json!({ "ID": hive_id });
        self.api
            .write(Action::Delete, Collection::Hives, record, Some(hive_id))
            .await?;
        self.load_hives().await?;
        Ok(())
    }

    /// Delete a task, then reload the tasks snapshot.
    pub async fn delete_task(&self, task_id: i64) -> Result<()> {
        let record = serde_json::json!({ "ID": task_id });
        self.api
            .write(Action::Delete, Collection::Tasks, record, Some(task_id))
            .await?;
        self.load_tasks().await?;
        Ok(())
    }
}
