use anyhow::{bail, Context, Result};
use chrono::TimeZone;
use log::{debug, info, warn};

use crate::console::ConsolePresenter;
use crate::interval::{normalize, NormalizedInterval};
use crate::invoice::{build_invoice, Invoice, InvoiceParams};
use crate::solid_invoice::InvoiceRepository;
use crate::time_entry::parse_work_entries;
use crate::work_log::WorkLog;

/// 請求書を作成するための引数。
#[derive(Debug, clap::Args)]
pub struct InvoiceArgs {
    #[clap(long = "client_id", help = "ID of the client")]
    pub client_id: String,

    #[clap(long = "contact_id", help = "ID of the contact at the client")]
    pub contact_id: String,

    #[clap(
        long = "price_per_hour",
        help = "Hourly rate",
        parse(try_from_str = parse_price),
    )]
    pub price_per_hour: f64,

    #[clap(
        long = "invoice_id",
        help = "ID of the invoice to replace, if none is provided a new invoice will be created"
    )]
    pub invoice_id: Option<String>,
}

impl InvoiceArgs {
    fn params(&self) -> InvoiceParams<'_> {
        InvoiceParams {
            client_id: &self.client_id,
            contact_id: &self.contact_id,
            price_per_hour: self.price_per_hour,
        }
    }
}

/// timewarriorのexportから下書きの請求書を作成する。
///
/// 日付は`tz`のタイムゾーンで決定する。
/// 入力が不正な場合は何も出力せずにエラーを返す。
///
/// # Arguments
///
/// * `input` - timewarriorのexport(JSON配列)
/// * `args` - 請求書を作成するための引数
/// * `tz` - 日付を決めるためのタイムゾーン
pub fn create_invoice<Tz: TimeZone>(input: &str, args: &InvoiceArgs, tz: &Tz) -> Result<Invoice> {
    let entries = parse_work_entries(input).context("Failed to read work entries")?;
    info!("Read {} entries", entries.len());

    let intervals: Vec<NormalizedInterval> =
        entries.iter().map(|entry| normalize(entry, tz)).collect();
    for interval in &intervals {
        debug!(
            "{} {:.2}h {:?}",
            interval.local_date,
            interval.hours(),
            interval.descriptive_tags
        );
    }
    let work_log: WorkLog = intervals.iter().collect();
    info!(
        "Aggregated into {} groups, skipped {} entries without descriptive tags",
        work_log.len(),
        intervals
            .iter()
            .filter(|interval| interval.descriptive_tags.is_empty())
            .count()
    );

    if work_log.is_empty() {
        warn!("No billable entries found");
    }

    Ok(build_invoice(work_log.groups(), &args.params()))
}

/// 請求書を送信し、レスポンスを表示する。
///
/// 請求書IDが指定されている場合は既存の請求書を置き換え、指定されていない場合は新規作成する。
pub async fn submit_invoice<T, P>(
    repository: &T,
    presenter: &mut P,
    invoice_id: Option<&str>,
    invoice: &Invoice,
) -> Result<()>
where
    T: InvoiceRepository,
    P: ConsolePresenter,
{
    let response = match invoice_id {
        Some(invoice_id) => repository
            .update_invoice(invoice_id, invoice)
            .await
            .with_context(|| format!("Failed to update invoice {}", invoice_id))?,
        None => repository
            .create_invoice(invoice)
            .await
            .context("Failed to create invoice")?,
    };

    presenter.show_response(&response)
}

/// 時間単価をパースする。
fn parse_price(s: &str) -> Result<f64> {
    let price: f64 = s
        .trim()
        .parse()
        .with_context(|| format!("Failed to parse price: {}", s))?;
    if !price.is_finite() || price < 0.0 {
        bail!("Price must be a non-negative number: {}", s);
    }

    Ok(price)
}
