use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::invoice::Invoice;
use crate::solid_invoice::{ResponseBody, SubmitResponse};

/// Consoleに請求書を表示するためのtrait。
pub trait ConsolePresenter {
    /// 請求書を表示する。
    fn show_invoice(&mut self, invoice: &Invoice) -> Result<()>;

    /// 請求書APIのレスポンスを表示する。
    fn show_response(&mut self, response: &SubmitResponse) -> Result<()>;
}

/// インデント幅4のJSONで表示する。
pub struct ConsoleJson<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleJson<'a, W> {
    /// 新しい`ConsoleJson`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut *self.writer, formatter);
        value
            .serialize(&mut serializer)
            .context("Failed to write JSON")?;
        writeln!(self.writer).context("Failed to write newline")?;

        Ok(())
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleJson<'a, W> {
    fn show_invoice(&mut self, invoice: &Invoice) -> Result<()> {
        self.write_json(invoice)
    }

    // ステータスコードの次の行にボディを表示する。
    fn show_response(&mut self, response: &SubmitResponse) -> Result<()> {
        writeln!(self.writer, "{}", response.status).context("Failed to write status")?;
        match &response.body {
            ResponseBody::Json(value) => self.write_json(value),
            ResponseBody::Text(text) => {
                writeln!(self.writer, "{}", text).context("Failed to write response body")
            }
        }
    }
}
