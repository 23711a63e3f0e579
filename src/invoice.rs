use log::info;
use serde::Serialize;

use crate::work_log::WorkGroup;

const SECONDS_PER_HOUR: i64 = 3600;

/// SolidInvoiceのAPIに送る請求書。
///
/// フィールドの順序がそのままJSONのキーの順序になる。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Invoice {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub client: String,
    pub items: Vec<InvoiceItem>,
    pub users: Vec<String>,
    pub status: &'static str,
    pub terms: Option<String>,
    pub notes: Option<String>,
}

/// 請求書の明細。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InvoiceItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub description: String,
    /// 時間単価。小数点以下2桁の文字列。
    pub price: String,
    /// 作業時間。小数点以下2桁に丸めた値。
    pub qty: f64,
    pub tax: Option<String>,
    #[serde(skip)]
    price_per_hour: f64,
}

impl InvoiceItem {
    /// 明細の小計(`qty * price`を小数点以下2桁に丸めた値)を返す。
    ///
    /// 請求書には含めない。
    pub fn subtotal(&self) -> f64 {
        round_cents(self.qty * self.price_per_hour)
    }
}

/// 請求書を作成するための引数。
#[derive(Clone, Debug)]
pub struct InvoiceParams<'a> {
    pub client_id: &'a str,
    pub contact_id: &'a str,
    pub price_per_hour: f64,
}

/// 集計結果から下書きの請求書を作成する。
///
/// 明細はグループの順序のまま1グループ1明細で作成する。
pub fn build_invoice<'a, I>(groups: I, params: &InvoiceParams) -> Invoice
where
    I: IntoIterator<Item = &'a WorkGroup>,
{
    let items: Vec<InvoiceItem> = groups
        .into_iter()
        .map(|group| build_item(group, params.price_per_hour))
        .collect();
    let total: f64 = items.iter().map(InvoiceItem::subtotal).sum();
    info!("Built invoice with {} items, total {:.2}", items.len(), total);

    Invoice {
        context: "/api/contexts/Invoice",
        kind: "Invoice",
        client: format!("/api/clients/{}", params.client_id),
        items,
        users: vec![format!("/api/contacts/{}", params.contact_id)],
        status: "draft",
        terms: None,
        notes: None,
    }
}

fn build_item(group: &WorkGroup, price_per_hour: f64) -> InvoiceItem {
    InvoiceItem {
        kind: "Item",
        description: format!(
            "{}: {}",
            group.key.local_date.format("%Y-%m-%d"),
            group.key.tag_label
        ),
        price: format!("{:.2}", price_per_hour),
        qty: round_hours(group.seconds),
        tax: None,
        price_per_hour,
    }
}

/// 秒数を時間に変換し、小数点以下2桁で四捨五入する。
///
/// 丸めは桁あふれしないように`i128`の整数演算で行う。
pub fn round_hours(seconds: i64) -> f64 {
    let seconds_per_hour = i128::from(SECONDS_PER_HOUR);
    let hundredths = (i128::from(seconds) * 100 + seconds_per_hour / 2).div_euclid(seconds_per_hour);
    hundredths as f64 / 100.0
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
