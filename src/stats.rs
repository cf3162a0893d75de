use crate::models::{BarChart, CategoryCount, Charts, PieChart, PieSlice, Record};
use crate::survey::{activity_tags, TIME_PALETTE};
use std::collections::HashMap;

const ACTIVITY_TITLE: &str = "휴식 활동 선호도 (총 응답)";
const ACTIVITY_COLOR: &str = "#4CAF50";
const ACTIVITY_BORDER: &str = "#388E3C";
const TIME_TITLE: &str = "휴식 시간대 비율";
const MISSING_TIME: &str = "-";

pub fn build_charts(records: &[Record]) -> Charts {
    let slices = time_slot_frequency(records)
        .into_iter()
        .enumerate()
        .map(|(index, slot)| PieSlice {
            label: slot.label,
            count: slot.count,
            color: TIME_PALETTE[index % TIME_PALETTE.len()].to_string(),
        })
        .collect();

    Charts {
        activity: BarChart {
            title: ACTIVITY_TITLE.to_string(),
            color: ACTIVITY_COLOR.to_string(),
            border_color: ACTIVITY_BORDER.to_string(),
            bars: activity_frequency(records),
        },
        time: PieChart {
            title: TIME_TITLE.to_string(),
            slices,
        },
    }
}

/// Counts every activity tag across all records, in first-seen order.
pub fn activity_frequency(records: &[Record]) -> Vec<CategoryCount> {
    count_in_order(
        records
            .iter()
            .flat_map(|record| activity_tags(&record.activity)),
    )
}

/// Counts each distinct `Time` value, in first-seen order.
pub fn time_slot_frequency(records: &[Record]) -> Vec<CategoryCount> {
    count_in_order(records.iter().map(|record| {
        let time = record.time.trim();
        if time.is_empty() { MISSING_TIME } else { time }
    }))
}

fn count_in_order<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for label in labels {
        match index.get(label).copied() {
            Some(slot) => counts[slot].count = counts[slot].count.saturating_add(1),
            None => {
                index.insert(label, counts.len());
                counts.push(CategoryCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(activity: &str, time: &str) -> Record {
        Record {
            activity: activity.to_string(),
            time: time.to_string(),
            ..Record::default()
        }
    }

    fn counts(items: &[CategoryCount]) -> Vec<(&str, u64)> {
        items
            .iter()
            .map(|item| (item.label.as_str(), item.count))
            .collect()
    }

    #[test]
    fn activity_tokens_are_trimmed() {
        let records = vec![record("a, b ,c", "30분")];
        assert_eq!(
            counts(&activity_frequency(&records)),
            vec![("a", 1), ("b", 1), ("c", 1)]
        );
    }

    #[test]
    fn blank_activity_tokens_never_become_categories() {
        let records = vec![record(" , ,산책,", "30분"), record("", "30분"), record("   ", "30분")];
        let bars = activity_frequency(&records);
        assert_eq!(counts(&bars), vec![("산책", 1)]);
        assert!(bars.iter().all(|bar| !bar.label.trim().is_empty()));
    }

    #[test]
    fn activity_counts_accumulate_across_records() {
        let records = vec![
            record("독서, 명상", "30분"),
            record("명상, 기타(뜨개질)", "30분"),
            record("독서,명상", "30분"),
        ];
        assert_eq!(
            counts(&activity_frequency(&records)),
            vec![("독서", 2), ("명상", 3), ("기타(뜨개질)", 1)]
        );
    }

    #[test]
    fn time_slots_make_one_slice_per_value() {
        let records = vec![record("", "30분"), record("", "30분"), record("", "1~2시간")];
        let charts = build_charts(&records);

        let slices: Vec<_> = charts
            .time
            .slices
            .iter()
            .map(|slice| (slice.label.as_str(), slice.count, slice.color.as_str()))
            .collect();
        assert_eq!(
            slices,
            vec![("30분", 2, "#FFA07A"), ("1~2시간", 1, "#6495ED")]
        );
    }

    #[test]
    fn palette_cycles_past_four_slices() {
        let records: Vec<_> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|time| record("", time))
            .collect();
        let charts = build_charts(&records);
        assert_eq!(charts.time.slices.len(), 5);
        assert_eq!(charts.time.slices[4].color, TIME_PALETTE[0]);
    }

    #[test]
    fn missing_time_is_grouped_under_dash() {
        let records = vec![record("", ""), record("", "  ")];
        assert_eq!(counts(&time_slot_frequency(&records)), vec![("-", 2)]);
    }

    #[test]
    fn empty_records_give_empty_series() {
        let charts = build_charts(&[]);
        assert!(charts.activity.bars.is_empty());
        assert!(charts.time.slices.is_empty());
        assert_eq!(charts.activity.title, ACTIVITY_TITLE);
    }
}
