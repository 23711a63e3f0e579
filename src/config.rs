use std::{env, time::Duration};

use anyhow::{bail, Context, Result};

const BASE_URL_VAR: &str = "SOLIDINVOICE_BASE_URL";
const API_TOKEN_VAR: &str = "SOLIDINVOICE_API_TOKEN";
const TIMEOUT_VAR: &str = "SOLIDINVOICE_TIMEOUT_SECS";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// SolidInvoiceへ送信するための設定。
#[derive(Clone, PartialEq)]
pub struct SubmissionConfig {
    /// 末尾の`/`を取り除いたベースURL。
    pub base_url: String,
    pub api_token: String,
    pub timeout: Duration,
}

// トークンをログに出さない
impl std::fmt::Debug for SubmissionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SubmissionConfig {
    /// 環境変数から設定を読み込む。
    ///
    /// `SOLIDINVOICE_BASE_URL`と`SOLIDINVOICE_API_TOKEN`のどちらかが未設定(または空)の場合は
    /// `None`を返し、請求書は送信せずに標準出力へ表示する。
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 指定された関数で変数を参照して設定を作成する。
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let (base_url, api_token) = match (non_empty(BASE_URL_VAR), non_empty(API_TOKEN_VAR)) {
            (Some(base_url), Some(api_token)) => (base_url, api_token),
            _ => return Ok(None),
        };
        let timeout = match non_empty(TIMEOUT_VAR) {
            Some(value) => parse_timeout(&value)
                .with_context(|| format!("Invalid {}: {:?}", TIMEOUT_VAR, value))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            timeout,
        }))
    }
}

fn parse_timeout(value: &str) -> Result<Duration> {
    let secs: u64 = value.trim().parse().context("Not an integer")?;
    if secs == 0 {
        bail!("Timeout must be positive");
    }

    Ok(Duration::from_secs(secs))
}
