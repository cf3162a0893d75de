use crate::survey::{activity_tags, satisfaction_emoji};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Column headers of the stored record, in key order.
pub const RECORD_COLUMNS: [&str; 10] = [
    "Location",
    "Outdoor",
    "Activity",
    "Time",
    "Mood",
    "Satisfaction",
    "Important",
    "Recommend",
    "Memory",
    "Timestamp",
];

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A survey entry as returned by the remote endpoint.
///
/// Spreadsheet cells may come back as numbers, booleans or null, and columns
/// may be missing, so every field is decoded leniently into text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub outdoor: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mood: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub satisfaction: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub important: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recommend: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub memory: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: String,
}

impl Record {
    /// Parses `Timestamp` as RFC 3339. Offset-less ISO date-times and bare
    /// dates are taken as UTC (dates at midnight).
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        for format in NAIVE_DATE_TIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn column_values(&self) -> [&str; 10] {
        [
            self.location.as_str(),
            self.outdoor.as_str(),
            self.activity.as_str(),
            self.time.as_str(),
            self.mood.as_str(),
            self.satisfaction.as_str(),
            self.important.as_str(),
            self.recommend.as_str(),
            self.memory.as_str(),
            self.timestamp.as_str(),
        ]
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

/// The record body sent on write. The remote endpoint assigns `Timestamp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewRecord {
    pub location: String,
    pub outdoor: String,
    pub activity: String,
    pub time: String,
    pub mood: String,
    pub satisfaction: String,
    pub important: String,
    pub recommend: String,
    pub memory: String,
}

/// Raw form values posted by the page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmitRequest {
    pub location: String,
    pub outdoor: String,
    pub outdoor_etc: String,
    pub activity: Vec<String>,
    pub activity_etc: String,
    pub time: String,
    pub time_etc: String,
    pub mood: String,
    pub satisfaction: String,
    pub important: String,
    pub recommend: String,
    pub memory: String,
}

/// Reply to a submission. `listing` is the refreshed list, absent when the
/// reload after the write failed.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: String,
    pub listing: Option<RecordsResponse>,
}

/// One list row, with display fallbacks already applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRow {
    pub location: String,
    pub outdoor: String,
    pub activity: String,
    pub activity_tags: Vec<String>,
    pub time: String,
    pub mood: String,
    pub satisfaction: String,
    pub satisfaction_emoji: String,
    pub important: String,
    pub recommend: String,
    pub timestamp: String,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        Self {
            location: or_dash(&record.location),
            outdoor: or_dash(&record.outdoor),
            activity: record.activity.clone(),
            activity_tags: activity_tags(&record.activity).map(str::to_string).collect(),
            time: or_dash(&record.time),
            mood: or_dash(&record.mood),
            satisfaction: record.satisfaction.clone(),
            satisfaction_emoji: satisfaction_emoji(&record.satisfaction)
                .unwrap_or_default()
                .to_string(),
            important: record.important.clone(),
            recommend: record.recommend.clone(),
            timestamp: record.timestamp.clone(),
        }
    }
}

fn or_dash(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub revision: u64,
    pub count: usize,
    pub records: Vec<RecordRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub color: String,
    pub border_color: String,
    pub bars: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: u64,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Charts {
    pub activity: BarChart,
    pub time: PieChart,
}

#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub revision: u64,
    pub activity: BarChart,
    pub time: PieChart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_spreadsheet_cells_leniently() {
        let record: Record = serde_json::from_value(serde_json::json!({
            "Location": 302,
            "Outdoor": null,
            "Activity": "독서, 명상",
            "Satisfaction": "좋음",
            "Important": true,
            "Timestamp": "2025-05-01T09:30:00.000Z",
            "Extra": "ignored"
        }))
        .unwrap();

        assert_eq!(record.location, "302");
        assert_eq!(record.outdoor, "");
        assert_eq!(record.important, "true");
        assert_eq!(record.time, "");
        assert!(record.parsed_timestamp().is_some());
    }

    #[test]
    fn parses_sheet_style_timestamps() {
        let record = Record {
            timestamp: "2025-05-01 09:30:00".to_string(),
            ..Record::default()
        };
        let parsed = record.parsed_timestamp().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-05-01T09:30:00+00:00");

        let date_only = Record {
            timestamp: "2025-03-01".to_string(),
            ..Record::default()
        };
        assert_eq!(
            date_only.parsed_timestamp().unwrap().to_rfc3339(),
            "2025-03-01T00:00:00+00:00"
        );

        let garbage = Record {
            timestamp: "어제".to_string(),
            ..Record::default()
        };
        assert!(garbage.parsed_timestamp().is_none());
    }

    #[test]
    fn new_record_uses_capitalized_keys() {
        let body = serde_json::to_value(NewRecord {
            outdoor: "기타(rooftop)".to_string(),
            ..NewRecord::default()
        })
        .unwrap();
        assert_eq!(body["Outdoor"], "기타(rooftop)");
        assert!(body.get("Timestamp").is_none());
        assert_eq!(body.as_object().unwrap().len(), 9);
    }

    #[test]
    fn row_applies_display_fallbacks() {
        let record = Record {
            activity: "산책, , 독서 ".to_string(),
            satisfaction: "매우 좋음".to_string(),
            ..Record::default()
        };
        let row = RecordRow::from(&record);
        assert_eq!(row.location, "-");
        assert_eq!(row.time, "-");
        assert_eq!(row.activity_tags, vec!["산책", "독서"]);
        assert_eq!(row.satisfaction_emoji, "🤩");
    }
}
