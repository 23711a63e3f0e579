use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// timewarriorのexportで利用される日時のフォーマット。
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// timewarriorのexportをデシリアライズするための構造体。
///
/// `id`や`annotation`など利用しないフィールドは無視する。
#[derive(Debug, Deserialize)]
struct TimewarriorEntry {
    start: String,
    end: Option<String>,
    tags: Vec<String>,
}

/// 1件分の作業記録。
#[derive(Clone, Debug, PartialEq)]
pub struct WorkEntry {
    pub start: DateTime<Utc>,
    /// 終了していない場合は`None`となる。
    pub end: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl TryFrom<TimewarriorEntry> for WorkEntry {
    type Error = anyhow::Error;

    fn try_from(entry: TimewarriorEntry) -> Result<Self> {
        let start = parse_timestamp(&entry.start)?;
        // 空文字の`end`は終了していないものとして扱う
        let end = entry
            .end
            .as_deref()
            .filter(|end| !end.is_empty())
            .map(parse_timestamp)
            .transpose()?;
        if let Some(end) = end {
            if end < start {
                bail!("End {} is before start {}", end, start);
            }
        }

        Ok(Self {
            start,
            end,
            tags: entry.tags,
        })
    }
}

/// timewarriorのexport(JSON配列)を読み込む。
///
/// 1件でも不正なエントリーがあればエラーとする。
pub fn parse_work_entries(input: &str) -> Result<Vec<WorkEntry>> {
    let entries: Vec<TimewarriorEntry> =
        serde_json::from_str(input).context("Failed to parse timewarrior export")?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            WorkEntry::try_from(entry).with_context(|| format!("Invalid entry at index {}", index))
        })
        .collect()
}

/// `YYYYMMDDTHHMMSSZ`形式のUTC日時をパースする。
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if s.len() != 16 {
        bail!("Unexpected timestamp length: {:?}", s);
    }
    let naive = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .with_context(|| format!("Failed to parse timestamp: {:?}", s))?;

    Ok(naive.and_utc())
}
