use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;

use crate::interval::NormalizedInterval;

/// タグを連結する際の区切り文字。
const TAG_SEPARATOR: &str = ", ";

/// 集計の単位となるキー。日付とタグのラベルの組。
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkGroupKey {
    pub local_date: NaiveDate,
    /// 残ったタグを元の順序のまま`, `で連結したもの。重複は取り除かない。
    pub tag_label: String,
}

/// 集計結果の1グループ。
#[derive(Clone, Debug, PartialEq)]
pub struct WorkGroup {
    pub key: WorkGroupKey,
    pub seconds: i64,
}

/// 日付とタグごとに作業時間を集計する。
///
/// グループはまず日付が最初に現れた順、同じ日付の中ではタグのラベルが最初に現れた順に並ぶ。
#[derive(Debug, Default)]
pub struct WorkLog {
    days: Vec<Vec<WorkGroup>>,
    day_index: HashMap<NaiveDate, usize>,
    group_index: HashMap<WorkGroupKey, (usize, usize)>,
}

impl WorkLog {
    /// 空の`WorkLog`を返す。
    pub fn new() -> Self {
        Self::default()
    }

    /// 作業記録を集計に加える。
    ///
    /// タグが残っていない作業記録は集計対象外とし、`false`を返す。
    pub fn add(&mut self, interval: &NormalizedInterval) -> bool {
        if interval.descriptive_tags.is_empty() {
            debug!("Skip entry without descriptive tags on {}", interval.local_date);
            return false;
        }

        let key = WorkGroupKey {
            local_date: interval.local_date,
            tag_label: interval.descriptive_tags.join(TAG_SEPARATOR),
        };
        let (day, position) = match self.group_index.get(&key) {
            Some(found) => *found,
            None => {
                let day = *self
                    .day_index
                    .entry(key.local_date)
                    .or_insert_with(|| {
                        self.days.push(Vec::new());
                        self.days.len() - 1
                    });
                self.days[day].push(WorkGroup {
                    key: key.clone(),
                    seconds: 0,
                });
                let found = (day, self.days[day].len() - 1);
                self.group_index.insert(key, found);
                found
            }
        };
        self.days[day][position].seconds += interval.seconds;

        true
    }

    /// 集計済みのグループ数を返す。
    pub fn len(&self) -> usize {
        self.group_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group_index.is_empty()
    }

    /// 集計済みのグループを出力順に返す。
    pub fn groups(&self) -> impl Iterator<Item = &WorkGroup> {
        self.days.iter().flatten()
    }
}

impl<'a> FromIterator<&'a NormalizedInterval> for WorkLog {
    fn from_iter<I: IntoIterator<Item = &'a NormalizedInterval>>(iter: I) -> Self {
        iter.into_iter().fold(WorkLog::new(), |mut work_log, interval| {
            work_log.add(interval);
            work_log
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{WorkGroup, WorkGroupKey, WorkLog};
    use crate::interval::NormalizedInterval;

    fn interval(day: u32, seconds: i64, tags: &[&str]) -> NormalizedInterval {
        NormalizedInterval {
            local_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            seconds,
            descriptive_tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    fn group(day: u32, tag_label: &str, seconds: i64) -> WorkGroup {
        WorkGroup {
            key: WorkGroupKey {
                local_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                tag_label: tag_label.to_string(),
            },
            seconds,
        }
    }

    fn collected(work_log: &WorkLog) -> Vec<WorkGroup> {
        work_log.groups().cloned().collect()
    }

    #[test]
    fn test_add_sums_same_group() {
        let mut work_log = WorkLog::new();

        assert!(work_log.add(&interval(1, 3600, &["meeting"])));
        assert!(work_log.add(&interval(1, 1800, &["meeting"])));

        assert_eq!(collected(&work_log), vec![group(1, "meeting", 5400)]);
    }

    #[test]
    fn test_add_skips_empty_tags() {
        let mut work_log = WorkLog::new();

        assert!(!work_log.add(&interval(1, 3600, &[])));

        assert!(work_log.is_empty());
        assert_eq!(work_log.groups().count(), 0);
    }

    #[test]
    fn test_add_open_interval_creates_group() {
        let mut work_log = WorkLog::new();

        work_log.add(&interval(1, 0, &["meeting"]));

        assert_eq!(work_log.len(), 1);
        assert_eq!(collected(&work_log), vec![group(1, "meeting", 0)]);
    }

    #[test]
    fn test_groups_ordered_by_first_date_then_first_tag_label() {
        let intervals = vec![
            interval(2, 60, &["b"]),
            interval(1, 60, &["a"]),
            interval(2, 60, &["a"]),
            interval(1, 60, &["a"]),
            interval(2, 60, &["b"]),
        ];

        let work_log: WorkLog = intervals.iter().collect();

        assert_eq!(
            collected(&work_log),
            vec![group(2, "b", 120), group(2, "a", 60), group(1, "a", 120)]
        );
    }

    #[test]
    fn test_tag_label_keeps_order_and_duplicates() {
        let intervals = vec![
            interval(1, 60, &["review", "design", "review"]),
            interval(1, 60, &["design", "review"]),
        ];

        let work_log: WorkLog = intervals.iter().collect();

        assert_eq!(
            collected(&work_log),
            vec![
                group(1, "review, design, review", 60),
                group(1, "design, review", 60),
            ]
        );
    }
}
