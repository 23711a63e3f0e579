use anyhow::{Context, Result};
use log::info;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Method,
};
use serde_json::Value;

use crate::config::SubmissionConfig;
use crate::invoice::Invoice;

/// SolidInvoice APIが受け付けるメディアタイプ。
const LD_JSON: &str = "application/ld+json";
const API_TOKEN_HEADER: &str = "X-API-TOKEN";

/// 請求書APIのレスポンス。
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: ResponseBody,
}

/// レスポンスボディ。JSONとして解釈できない場合はテキストのまま保持する。
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

/// 請求書を登録するためのtrait。
#[cfg_attr(test, mockall::automock)]
pub trait InvoiceRepository {
    /// 新しい請求書を作成する。
    async fn create_invoice(&self, invoice: &Invoice) -> Result<SubmitResponse>;

    /// 既存の請求書を置き換える。
    ///
    /// # Arguments
    ///
    /// * `invoice_id` - 置き換える請求書のID
    /// * `invoice` - 新しい内容
    async fn update_invoice(&self, invoice_id: &str, invoice: &Invoice) -> Result<SubmitResponse>;
}

/// SolidInvoice APIと通信するためのクライアント。
///
/// # Examples
///
/// ```
/// let client = SolidInvoiceClient::new(&config).unwrap();
/// let response = client.create_invoice(&invoice).await.unwrap();
/// ```
pub struct SolidInvoiceClient {
    client: Client,
    api_url: String,
    api_token: String,
}

impl SolidInvoiceClient {
    /// 新しい`SolidInvoiceClient`を返す。
    ///
    /// リクエストには設定されたタイムアウトを適用する。
    pub fn new(config: &SubmissionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: format!("{}/api", config.base_url),
            api_token: config.api_token.clone(),
        })
    }

    /// 請求書を送信する。
    ///
    /// HTTPのステータスコードは解釈せず、そのまま返す。
    async fn send(&self, method: Method, url: String, invoice: &Invoice) -> Result<SubmitResponse> {
        info!("{} {}", method, url);
        let body = serde_json::to_string(invoice).context("Failed to serialize invoice")?;

        let response = self
            .client
            .request(method, &url)
            .header(ACCEPT, LD_JSON)
            .header(CONTENT_TYPE, LD_JSON)
            .header(API_TOKEN_HEADER, &self.api_token)
            .body(body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to SolidInvoice API at {}", url))?;
        let status = response.status().as_u16();
        info!("Response status: {}", status);

        let text = response
            .text()
            .await
            .context("Failed to read response body")?;
        let body = match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        };

        Ok(SubmitResponse { status, body })
    }
}

impl InvoiceRepository for SolidInvoiceClient {
    async fn create_invoice(&self, invoice: &Invoice) -> Result<SubmitResponse> {
        self.send(Method::POST, format!("{}/invoices", self.api_url), invoice)
            .await
    }

    async fn update_invoice(&self, invoice_id: &str, invoice: &Invoice) -> Result<SubmitResponse> {
        self.send(
            Method::PUT,
            format!("{}/invoices/{}", self.api_url, invoice_id),
            invoice,
        )
        .await
    }
}
