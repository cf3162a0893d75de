//! Survey vocabulary and the rules that turn raw form input into a record.

use crate::models::{NewRecord, SubmitRequest};

/// The "other" option. When picked together with a free-text detail the
/// stored value becomes `기타(detail)`.
pub const OTHER: &str = "기타";

pub const OUTDOOR_OPTIONS: &[&str] = &["실내", "야외", OTHER];

pub const ACTIVITY_OPTIONS: &[&str] = &["산책", "독서", "음악 감상", "명상", "운동", "낮잠", OTHER];

pub const TIME_SLOTS: &[&str] = &["30분", "1~2시간", "6시간 이상", OTHER];

/// Pie slice colors, one per time slot in `TIME_SLOTS` order.
pub const TIME_PALETTE: [&str; 4] = ["#FFA07A", "#6495ED", "#90EE90", "#D3D3D3"];

pub const SATISFACTION_LEVELS: &[(&str, &str)] = &[
    ("매우 좋음", "🤩"),
    ("좋음", "😊"),
    ("보통", "😐"),
    ("별로", "😞"),
];

pub fn satisfaction_emoji(label: &str) -> Option<&'static str> {
    SATISFACTION_LEVELS
        .iter()
        .find(|(level, _)| *level == label.trim())
        .map(|(_, emoji)| *emoji)
}

/// Replaces the bare "other" token with `기타(detail)` when a detail was typed.
pub fn with_other_detail(value: &str, detail: &str) -> String {
    let value = value.trim();
    let detail = detail.trim();
    if value == OTHER && !detail.is_empty() {
        format!("{OTHER}({detail})")
    } else {
        value.to_string()
    }
}

/// Joins the checked activity tags into the stored `a, b, c` form.
pub fn join_activities(selected: &[String], detail: &str) -> String {
    let detail = activity_detail(detail);
    selected
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(|tag| with_other_detail(tag, &detail))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Commas would split the annotated tag, so they become ` / `.
fn activity_detail(detail: &str) -> String {
    detail
        .split([',', '，'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Splits a stored Activity field into its non-empty trimmed tags.
pub fn activity_tags(activity: &str) -> impl Iterator<Item = &str> {
    activity
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
}

pub fn build_record(form: &SubmitRequest) -> NewRecord {
    NewRecord {
        location: form.location.trim().to_string(),
        outdoor: with_other_detail(&form.outdoor, &form.outdoor_etc),
        activity: join_activities(&form.activity, &form.activity_etc),
        time: with_other_detail(&form.time, &form.time_etc),
        mood: form.mood.trim().to_string(),
        satisfaction: form.satisfaction.trim().to_string(),
        important: form.important.trim().to_string(),
        recommend: form.recommend.trim().to_string(),
        memory: form.memory.trim().to_string(),
    }
}
