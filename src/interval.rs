use chrono::{NaiveDate, TimeZone};

use crate::tag::filter_tags;
use crate::time_entry::WorkEntry;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// 集計用に正規化した作業記録。
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedInterval {
    /// 開始日時を指定したタイムゾーンに変換した日付。
    pub local_date: NaiveDate,
    /// 経過秒数。終了していない場合は0とする。
    pub seconds: i64,
    pub descriptive_tags: Vec<String>,
}

impl NormalizedInterval {
    /// 経過時間を時間単位で返す。
    pub fn hours(&self) -> f64 {
        self.seconds as f64 / SECONDS_PER_HOUR
    }
}

/// time entryを正規化する。
///
/// 経過時間はUTCのまま計算し、タイムゾーンは日付の決定にのみ利用する。
/// `end`が`start`より前にならないことは`WorkEntry`の生成時に保証されている。
///
/// # Arguments
///
/// * `entry` - 正規化するtime entry
/// * `tz` - 日付を決めるためのタイムゾーン。通常は`Local`を渡す
pub fn normalize<Tz: TimeZone>(entry: &WorkEntry, tz: &Tz) -> NormalizedInterval {
    let seconds = entry
        .end
        .map(|end| (end - entry.start).num_seconds())
        .unwrap_or(0);

    NormalizedInterval {
        local_date: entry.start.with_timezone(tz).date_naive(),
        seconds,
        descriptive_tags: filter_tags(&entry.tags),
    }
}
