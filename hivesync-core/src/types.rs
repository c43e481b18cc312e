//! Core domain types for hivesync
//!
//! These types give the five remote sheets (Apiaries, Hives, Inspections,
//! Metrics, Tasks) a typed shape. Field names are mapped to the sheet column
//! headers with serde renames, so a record serializes back to exactly the
//! flat key/value row the API expects.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Apiary** | A physical site containing one or more hives |
//! | **Hive** | A single colony's housing unit, tied to an apiary |
//! | **Inspection** | A dated observation of a hive's internal condition |
//! | **Metric** | A dated sensor or manual reading for a hive |
//! | **Task** | A scheduled action item, optionally tied to a hive |
//! | **Collection** | One of the five named sheets on the remote endpoint |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================
// Collections
// ============================================

/// The five named collections on the remote endpoint.
///
/// `as_str` yields the sheet name used in request URLs and POST bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Apiaries,
    Hives,
    Inspections,
    Metrics,
    Tasks,
}

impl Collection {
    /// All collections, in the order `load_all` issues them.
    pub const ALL: [Collection; 5] = [
        Collection::Apiaries,
        Collection::Hives,
        Collection::Inspections,
        Collection::Metrics,
        Collection::Tasks,
    ];

    /// Returns the sheet name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Apiaries => "Apiaries",
            Collection::Hives => "Hives",
            Collection::Inspections => "Inspections",
            Collection::Metrics => "Metrics",
            Collection::Tasks => "Tasks",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Apiaries" | "apiaries" => Ok(Collection::Apiaries),
            "Hives" | "hives" => Ok(Collection::Hives),
            "Inspections" | "inspections" => Ok(Collection::Inspections),
            "Metrics" | "metrics" => Ok(Collection::Metrics),
            "Tasks" | "tasks" => Ok(Collection::Tasks),
            _ => Err(format!("unknown collection: {}", s)),
        }
    }
}

// ============================================
// Apiaries
// ============================================

/// A physical beekeeping site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apiary {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Location", default)]
    pub location: Option<String>,
    #[serde(rename = "GPS_Lat", default, deserialize_with = "wire::opt_f64")]
    pub gps_lat: Option<f64>,
    #[serde(rename = "GPS_Lng", default, deserialize_with = "wire::opt_f64")]
    pub gps_lng: Option<f64>,
    #[serde(rename = "Owner_Email", default)]
    pub owner_email: Option<String>,
    #[serde(rename = "Created_Date", default, deserialize_with = "wire::opt_date")]
    pub created_date: Option<NaiveDate>,
    #[serde(rename = "Notes", default)]
    pub notes: Option<String>,
}

/// Create payload for an apiary (no ID; the server assigns one).
#[derive(Debug, Clone, Serialize)]
pub struct NewApiary {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Location", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "GPS_Lat", skip_serializing_if = "Option::is_none")]
    pub gps_lat: Option<f64>,
    #[serde(rename = "GPS_Lng", skip_serializing_if = "Option::is_none")]
    pub gps_lng: Option<f64>,
    #[serde(rename = "Owner_Email", skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
    #[serde(rename = "Notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewApiary {
    /// Minimal payload with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            gps_lat: None,
            gps_lng: None,
            owner_email: None,
            notes: None,
        }
    }
}

// ============================================
// Hives
// ============================================

/// Lifecycle status of a hive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HiveStatus {
    Active,
    Inactive,
}

impl HiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HiveStatus::Active => "Active",
            HiveStatus::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for HiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HiveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" | "active" => Ok(HiveStatus::Active),
            "Inactive" | "inactive" => Ok(HiveStatus::Inactive),
            _ => Err(format!("unknown hive status: {}", s)),
        }
    }
}

/// A single colony's housing unit.
///
/// `apiary_id` must reference an existing apiary; the client enforces this
/// before creation (the storage backend does not).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hive {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Apiary_ID")]
    pub apiary_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub hive_type: Option<String>,
    #[serde(rename = "Install_Date", default, deserialize_with = "wire::opt_date")]
    pub install_date: Option<NaiveDate>,
    #[serde(
        rename = "Status",
        default = "wire::default_hive_status",
        deserialize_with = "wire::hive_status"
    )]
    pub status: HiveStatus,
    #[serde(rename = "QR_Code", default)]
    pub qr_code: Option<String>,
    #[serde(rename = "Notes", default)]
    pub notes: Option<String>,
}

/// Create payload for a hive.
#[derive(Debug, Clone, Serialize)]
pub struct NewHive {
    #[serde(rename = "Apiary_ID")]
    pub apiary_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub hive_type: Option<String>,
    #[serde(rename = "Install_Date", skip_serializing_if = "Option::is_none")]
    pub install_date: Option<NaiveDate>,
    #[serde(rename = "Status")]
    pub status: HiveStatus,
    #[serde(rename = "QR_Code", skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(rename = "Notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================
// Inspections
// ============================================

/// A dated observation record of a hive's internal condition.
///
/// Queen and store fields are free-form on the sheet ("Yes"/"No"/"Unknown",
/// 1-5 ratings entered as text), so they stay strings here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Hive_ID")]
    pub hive_id: i64,
    #[serde(rename = "Inspector", default)]
    pub inspector: Option<String>,
    #[serde(rename = "Date", default, deserialize_with = "wire::opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Duration", default, deserialize_with = "wire::opt_i64")]
    pub duration_minutes: Option<i64>,
    #[serde(rename = "Queen_Present", default)]
    pub queen_present: Option<String>,
    #[serde(rename = "Queen_Laying", default)]
    pub queen_laying: Option<String>,
    #[serde(rename = "Brood_Pattern", default)]
    pub brood_pattern: Option<String>,
    #[serde(rename = "Honey_Stores", default)]
    pub honey_stores: Option<String>,
    #[serde(rename = "Weather", default)]
    pub weather: Option<String>,
    #[serde(rename = "Notes", default)]
    pub notes: Option<String>,
}

/// Create payload for an inspection.
#[derive(Debug, Clone, Serialize)]
pub struct NewInspection {
    #[serde(rename = "Hive_ID")]
    pub hive_id: i64,
    #[serde(rename = "Inspector")]
    pub inspector: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Duration", skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(rename = "Queen_Present", skip_serializing_if = "Option::is_none")]
    pub queen_present: Option<String>,
    #[serde(rename = "Queen_Laying", skip_serializing_if = "Option::is_none")]
    pub queen_laying: Option<String>,
    #[serde(rename = "Brood_Pattern", skip_serializing_if = "Option::is_none")]
    pub brood_pattern: Option<String>,
    #[serde(rename = "Honey_Stores", skip_serializing_if = "Option::is_none")]
    pub honey_stores: Option<String>,
    #[serde(rename = "Weather", skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(rename = "Notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================
// Metrics
// ============================================

/// Where a metric reading came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricSource {
    #[default]
    Manual,
    Sensor,
}

impl MetricSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricSource::Manual => "Manual",
            MetricSource::Sensor => "Sensor",
        }
    }
}

impl std::fmt::Display for MetricSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MetricSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manual" | "manual" => Ok(MetricSource::Manual),
            "Sensor" | "sensor" => Ok(MetricSource::Sensor),
            _ => Err(format!("unknown metric source: {}", s)),
        }
    }
}

/// A dated sensor/manual reading for a hive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Hive_ID")]
    pub hive_id: i64,
    #[serde(rename = "Date", default, deserialize_with = "wire::opt_date")]
    pub date: Option<NaiveDate>,
    /// Time of day as entered on the sheet ("14:30")
    #[serde(rename = "Time", default)]
    pub time: Option<String>,
    /// Temperature in degrees Celsius
    #[serde(rename = "Temperature", default, deserialize_with = "wire::opt_f64")]
    pub temperature: Option<f64>,
    /// Hive weight in kilograms
    #[serde(rename = "Weight", default, deserialize_with = "wire::opt_f64")]
    pub weight: Option<f64>,
    /// Relative humidity percentage
    #[serde(rename = "Humidity", default, deserialize_with = "wire::opt_f64")]
    pub humidity: Option<f64>,
    #[serde(rename = "Source", default, deserialize_with = "wire::source_or_manual")]
    pub source: MetricSource,
    #[serde(rename = "Notes", default)]
    pub notes: Option<String>,
}

/// Create payload for a metric reading.
///
/// `source` defaults to Manual when not supplied, matching the sheet's
/// convention for hand-entered readings.
#[derive(Debug, Clone, Serialize)]
pub struct NewMetric {
    #[serde(rename = "Hive_ID")]
    pub hive_id: i64,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Time", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "Temperature", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(rename = "Weight", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "Humidity", skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(rename = "Source", skip_serializing_if = "Option::is_none")]
    pub source: Option<MetricSource>,
    #[serde(rename = "Notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================
// Tasks
// ============================================

/// Workflow status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" | "pending" => Ok(TaskStatus::Pending),
            "In Progress" | "in progress" | "in-progress" => Ok(TaskStatus::InProgress),
            "Completed" | "completed" => Ok(TaskStatus::Completed),
            _ => Err(format!("unknown task status: {}", s)),
        }
    }
}

/// Urgency of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" | "low" => Ok(TaskPriority::Low),
            "Medium" | "medium" => Ok(TaskPriority::Medium),
            "High" | "high" => Ok(TaskPriority::High),
            "Critical" | "critical" => Ok(TaskPriority::Critical),
            _ => Err(format!("unknown task priority: {}", s)),
        }
    }
}

/// A scheduled action item, optionally tied to a hive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "ID")]
    pub id: i64,
    /// Nullable reference; general chores have no hive
    #[serde(rename = "Hive_ID", default, deserialize_with = "wire::opt_i64")]
    pub hive_id: Option<i64>,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Due_Date", default, deserialize_with = "wire::opt_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(
        rename = "Status",
        default = "wire::default_task_status",
        deserialize_with = "wire::task_status"
    )]
    pub status: TaskStatus,
    #[serde(
        rename = "Priority",
        default = "wire::default_task_priority",
        deserialize_with = "wire::task_priority"
    )]
    pub priority: TaskPriority,
    #[serde(rename = "Created_Date", default, deserialize_with = "wire::opt_date")]
    pub created_date: Option<NaiveDate>,
}

/// Create payload for a task.
///
/// New tasks always start Pending; the sync layer sets the status on the
/// outgoing record.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    #[serde(rename = "Hive_ID", skip_serializing_if = "Option::is_none")]
    pub hive_id: Option<i64>,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Due_Date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "Priority")]
    pub priority: TaskPriority,
}

// ============================================
// Wire helpers
// ============================================

/// Lenient deserializers for sheet-backed values.
///
/// Apps Script serializes blank cells as empty strings and sometimes returns
/// numbers that were typed into text columns, so the numeric and date fields
/// accept either representation and map blanks to `None`. Status and priority
/// cells that are blank or unrecognized fall back to a fixed default instead
/// of failing the whole collection load: an unknown hive status reads as
/// `Inactive` so it never inflates the active count, a task status reads as
/// `Pending` (the value every task is created with), and a task priority
/// reads as `Medium`.
mod wire {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeNumber {
        Num(f64),
        Text(String),
    }

    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<MaybeNumber>::deserialize(deserializer)? {
            None => Ok(None),
            Some(MaybeNumber::Num(n)) => Ok(Some(n)),
            Some(MaybeNumber::Text(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    Ok(None)
                } else {
                    s.parse::<f64>().map(Some).map_err(serde::de::Error::custom)
                }
            }
        }
    }

    pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_f64(deserializer)?.map(|n| n as i64))
    }

    pub fn source_or_manual<'de, D>(deserializer: D) -> Result<super::MetricSource, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(super::MetricSource::Manual),
            Some(s) => Ok(s
                .trim()
                .parse::<super::MetricSource>()
                .unwrap_or(super::MetricSource::Manual)),
        }
    }

    pub fn default_hive_status() -> super::HiveStatus {
        super::HiveStatus::Inactive
    }

    pub fn hive_status<'de, D>(deserializer: D) -> Result<super::HiveStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(default_hive_status()),
            Some(s) => Ok(s
                .trim()
                .parse::<super::HiveStatus>()
                .unwrap_or_else(|_| default_hive_status())),
        }
    }

    pub fn default_task_status() -> super::TaskStatus {
        super::TaskStatus::Pending
    }

    pub fn task_status<'de, D>(deserializer: D) -> Result<super::TaskStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(default_task_status()),
            Some(s) => Ok(s
                .trim()
                .parse::<super::TaskStatus>()
                .unwrap_or_else(|_| default_task_status())),
        }
    }

    pub fn default_task_priority() -> super::TaskPriority {
        super::TaskPriority::Medium
    }

    pub fn task_priority<'de, D>(deserializer: D) -> Result<super::TaskPriority, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(default_task_priority()),
            Some(s) => Ok(s
                .trim()
                .parse::<super::TaskPriority>()
                .unwrap_or_else(|_| default_task_priority())),
        }
    }

    pub fn opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                // Date columns are "YYYY-MM-DD"; datetime cells carry a suffix
                let date_part = s.split('T').next().unwrap_or(s);
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_roundtrip() {
        for c in Collection::ALL {
            assert_eq!(c.as_str().parse::<Collection>().unwrap(), c);
        }
        assert!("Bees".parse::<Collection>().is_err());
    }

    #[test]
    fn test_task_status_wire_names() {
        assert_eq!(TaskStatus::InProgress.as_str(), "In Progress");
        assert_eq!(
            "In Progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }

    #[test]
    fn test_deserialize_hive_row() {
        let row = serde_json::json!({
            "ID": 1,
            "Apiary_ID": 1,
            "Name": "Hive Alpha",
            "Type": "Langstroth",
            "Install_Date": "2024-03-01",
            "Status": "Active",
            "QR_Code": "QR001",
            "Notes": "Strong colony"
        });
        let hive: Hive = serde_json::from_value(row).unwrap();
        assert_eq!(hive.id, 1);
        assert_eq!(hive.apiary_id, 1);
        assert_eq!(hive.status, HiveStatus::Active);
        assert_eq!(
            hive.install_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_deserialize_blank_cells() {
        // Blank sheet cells arrive as empty strings
        let row = serde_json::json!({
            "ID": 3,
            "Hive_ID": 2,
            "Date": "",
            "Time": "14:45",
            "Temperature": "25",
            "Weight": 25,
            "Humidity": "",
            "Source": "Manual"
        });
        let metric: Metric = serde_json::from_value(row).unwrap();
        assert_eq!(metric.date, None);
        assert_eq!(metric.temperature, Some(25.0));
        assert_eq!(metric.weight, Some(25.0));
        assert_eq!(metric.humidity, None);
        assert_eq!(metric.source, MetricSource::Manual);
    }

    #[test]
    fn test_deserialize_task_with_null_hive() {
        let row = serde_json::json!({
            "ID": 2,
            "Hive_ID": null,
            "Title": "Equipment Maintenance",
            "Description": "Clean spare boxes",
            "Due_Date": "2025-06-28",
            "Status": "Pending",
            "Priority": "Medium",
            "Created_Date": "2025-06-18"
        });
        let task: Task = serde_json::from_value(row).unwrap();
        assert_eq!(task.hive_id, None);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[test]
    fn test_malformed_status_cells_fall_back_to_defaults() {
        // One bad cell degrades that row, never the whole collection
        let row = serde_json::json!({
            "ID": 4,
            "Apiary_ID": 2,
            "Name": "Hive Omega",
            "Status": ""
        });
        let hive: Hive = serde_json::from_value(row).unwrap();
        assert_eq!(hive.status, HiveStatus::Inactive);

        let row = serde_json::json!({
            "ID": 9,
            "Title": "Check feeder",
            "Status": "Postponed",
            "Priority": ""
        });
        let task: Task = serde_json::from_value(row).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[test]
    fn test_missing_status_columns_fall_back_to_defaults() {
        let row = serde_json::json!({
            "ID": 10,
            "Title": "Order frames"
        });
        let task: Task = serde_json::from_value(row).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[test]
    fn test_new_hive_serializes_sheet_columns() {
        let hive = NewHive {
            apiary_id: 1,
            name: "Hive Delta".to_string(),
            hive_type: Some("Top Bar".to_string()),
            install_date: NaiveDate::from_ymd_opt(2025, 4, 1),
            status: HiveStatus::Active,
            qr_code: None,
            notes: None,
        };
        let value = serde_json::to_value(&hive).unwrap();
        assert_eq!(value["Apiary_ID"], 1);
        assert_eq!(value["Name"], "Hive Delta");
        assert_eq!(value["Status"], "Active");
        assert!(value.get("QR_Code").is_none());
    }

    #[test]
    fn test_datetime_cell_truncates_to_date() {
        let row = serde_json::json!({
            "ID": 1,
            "Name": "Main Apiary",
            "Created_Date": "2025-06-18T00:00:00.000Z"
        });
        let apiary: Apiary = serde_json::from_value(row).unwrap();
        assert_eq!(
            apiary.created_date,
            Some(NaiveDate::from_ymd_opt(2025, 6, 18).unwrap())
        );
    }
}
