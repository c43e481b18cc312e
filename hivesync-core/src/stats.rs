//! Dashboard aggregations over store snapshots
//!
//! Pure computations, no I/O: the composing application renders these however
//! it likes. Slicing rules (last five inspections, first five pending tasks,
//! last seven readings) follow the records system's dashboard conventions.

use std::collections::HashMap;

use crate::store::Store;
use crate::types::{HiveStatus, Inspection, Metric, Task, TaskPriority, TaskStatus};

/// Headline numbers and lists for the dashboard view.
#[derive(Debug, Clone, Default)]
pub struct DashboardSummary {
    /// Total number of hives
    pub total_hives: usize,
    /// Hives currently marked Active
    pub active_hives: usize,
    /// Tasks still Pending
    pub pending_tasks: usize,
    /// The five most recent inspections, in response order
    pub recent_inspections: Vec<Inspection>,
    /// The first five pending tasks
    pub upcoming_tasks: Vec<Task>,
    /// Pending task counts per priority
    pub tasks_by_priority: HashMap<TaskPriority, usize>,
}

impl DashboardSummary {
    /// Compute the summary from the current snapshots.
    pub fn compute(store: &Store) -> Self {
        let hives = store.hives();
        let tasks = store.tasks();
        let inspections = store.inspections();

        let total_hives = hives.len();
        let active_hives = hives
            .iter()
            .filter(|h| h.status == HiveStatus::Active)
            .count();

        let pending: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Pending)
            .collect();

        let mut tasks_by_priority = HashMap::new();
        for task in &pending {
            *tasks_by_priority.entry(task.priority).or_insert(0) += 1;
        }

        let recent_start = inspections.len().saturating_sub(5);
        let recent_inspections = inspections[recent_start..].to_vec();

        let upcoming_tasks = pending.iter().take(5).map(|t| (*t).clone()).collect();

        Self {
            total_hives,
            active_hives,
            pending_tasks: pending.len(),
            recent_inspections,
            upcoming_tasks,
            tasks_by_priority,
        }
    }

    /// Pending task count for one priority.
    pub fn pending_with_priority(&self, priority: TaskPriority) -> usize {
        self.tasks_by_priority.get(&priority).copied().unwrap_or(0)
    }
}

/// Parallel series for the metrics trend view (last seven readings).
///
/// Missing values chart as 0.0, matching the dashboard's historical behavior
/// for blank cells.
#[derive(Debug, Clone, Default)]
pub struct MetricsTrend {
    /// Date labels ("YYYY-MM-DD", or "N/A" when the reading has no date)
    pub labels: Vec<String>,
    /// Temperature in degrees Celsius
    pub temperature: Vec<f64>,
    /// Hive weight in kilograms
    pub weight: Vec<f64>,
    /// Relative humidity percentage
    pub humidity: Vec<f64>,
}

impl MetricsTrend {
    /// Build the trend from readings in response order.
    pub fn compute(readings: &[Metric]) -> Self {
        let start = readings.len().saturating_sub(7);
        let window = &readings[start..];

        Self {
            labels: window
                .iter()
                .map(|m| {
                    m.date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "N/A".to_string())
                })
                .collect(),
            temperature: window
                .iter()
                .map(|m| m.temperature.unwrap_or(0.0))
                .collect(),
            weight: window.iter().map(|m| m.weight.unwrap_or(0.0)).collect(),
            humidity: window.iter().map(|m| m.humidity.unwrap_or(0.0)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Apiary, Hive, MetricSource};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn apiary(id: i64, name: &str) -> Apiary {
        Apiary {
            id,
            name: name.to_string(),
            location: Some("Rietondale".to_string()),
            gps_lat: None,
            gps_lng: None,
            owner_email: None,
            created_date: Some(date("2025-06-18")),
            notes: None,
        }
    }

    fn hive(id: i64, apiary_id: i64, name: &str, status: HiveStatus) -> Hive {
        Hive {
            id,
            apiary_id,
            name: name.to_string(),
            hive_type: Some("Langstroth".to_string()),
            install_date: None,
            status,
            qr_code: None,
            notes: None,
        }
    }

    fn task(id: i64, hive_id: Option<i64>, title: &str, priority: TaskPriority) -> Task {
        Task {
            id,
            hive_id,
            title: title.to_string(),
            description: None,
            due_date: Some(date("2025-06-23")),
            status: TaskStatus::Pending,
            priority,
            created_date: Some(date("2025-06-18")),
        }
    }

    /// The reference fixture: 2 apiaries, 3 hives (2 Active), 3 pending
    /// tasks (2 High, 1 Medium).
    fn fixture_store() -> Store {
        let store = Store::new();
        store.replace_apiaries(vec![
            apiary(1, "Main Apiary"),
            apiary(2, "Sample Apiary"),
        ]);
        store.replace_hives(vec![
            hive(1, 1, "Hive Alpha", HiveStatus::Active),
            hive(2, 1, "Hive Beta", HiveStatus::Active),
            hive(3, 2, "Hive Gamma", HiveStatus::Inactive),
        ]);
        store.replace_tasks(vec![
            task(1, Some(1), "Varroa Treatment", TaskPriority::High),
            task(2, None, "Equipment Maintenance", TaskPriority::Medium),
            task(3, Some(2), "Feed Sugar Syrup", TaskPriority::High),
        ]);
        store
    }

    #[test]
    fn test_dashboard_counts_match_fixture() {
        let store = fixture_store();
        let summary = DashboardSummary::compute(&store);

        assert_eq!(summary.total_hives, 3);
        assert_eq!(summary.active_hives, 2);
        assert_eq!(summary.pending_tasks, 3);
        assert_eq!(summary.pending_with_priority(TaskPriority::High), 2);
        assert_eq!(summary.pending_with_priority(TaskPriority::Medium), 1);
        assert_eq!(summary.pending_with_priority(TaskPriority::Critical), 0);
    }

    #[test]
    fn test_completed_tasks_are_not_pending() {
        let store = fixture_store();
        let mut tasks = store.tasks();
        tasks[0].status = TaskStatus::Completed;
        store.replace_tasks(tasks);

        let summary = DashboardSummary::compute(&store);
        assert_eq!(summary.pending_tasks, 2);
        assert_eq!(summary.pending_with_priority(TaskPriority::High), 1);
        assert_eq!(summary.upcoming_tasks.len(), 2);
    }

    #[test]
    fn test_recent_inspections_keeps_last_five() {
        let store = Store::new();
        let inspections: Vec<Inspection> = (1..=8)
            .map(|id| Inspection {
                id,
                hive_id: 1,
                inspector: Some("John Beekeeper".to_string()),
                date: Some(date("2025-06-18")),
                duration_minutes: Some(30),
                queen_present: Some("Yes".to_string()),
                queen_laying: Some("Yes".to_string()),
                brood_pattern: None,
                honey_stores: None,
                weather: None,
                notes: None,
            })
            .collect();
        store.replace_inspections(inspections);

        let summary = DashboardSummary::compute(&store);
        let ids: Vec<i64> = summary.recent_inspections.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_empty_store_yields_zeroes() {
        let summary = DashboardSummary::compute(&Store::new());
        assert_eq!(summary.total_hives, 0);
        assert_eq!(summary.active_hives, 0);
        assert_eq!(summary.pending_tasks, 0);
        assert!(summary.recent_inspections.is_empty());
        assert!(summary.upcoming_tasks.is_empty());
    }

    #[test]
    fn test_metrics_trend_windows_last_seven() {
        let readings: Vec<Metric> = (1..=10)
            .map(|id| Metric {
                id,
                hive_id: 1,
                date: Some(date("2025-06-18")),
                time: None,
                temperature: Some(20.0 + id as f64),
                weight: Some(40.0),
                humidity: None,
                source: MetricSource::Manual,
                notes: None,
            })
            .collect();

        let trend = MetricsTrend::compute(&readings);
        assert_eq!(trend.labels.len(), 7);
        assert_eq!(trend.temperature[0], 24.0);
        assert_eq!(trend.temperature[6], 30.0);
        // Blank humidity charts as zero
        assert!(trend.humidity.iter().all(|&h| h == 0.0));
    }
}
