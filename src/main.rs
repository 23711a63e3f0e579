use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::info;

mod config;
mod console;
mod interval;
mod invoice;
mod invoice_command;
mod logger;
mod solid_invoice;
mod tag;
mod time_entry;
mod work_log;

use config::SubmissionConfig;
use console::{ConsoleJson, ConsolePresenter};
use invoice_command::{create_invoice, submit_invoice, InvoiceArgs};
use solid_invoice::SolidInvoiceClient;

/// timewarriorのexportから下書きの請求書を作成するCLIアプリケーション。
///
/// `SOLIDINVOICE_BASE_URL`と`SOLIDINVOICE_API_TOKEN`が設定されている場合は
/// SolidInvoiceへ送信し、設定されていない場合は標準出力へ表示する。
///
/// # Examples
/// ```
/// $ timew export :month | cargo run -- --client_id 1 --contact_id 2 --price_per_hour 80
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(flatten)]
    invoice: InvoiceArgs,

    #[clap(short = 'v', long = "verbose", help = "Show debug logs")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose)?;

    let config = SubmissionConfig::from_env().context("Failed to load configuration")?;

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read standard input")?;

    // 日付はこのプロセスのローカルタイムゾーンで決める
    let invoice = create_invoice(&input, &args.invoice, &Local)?;

    let mut stdout = io::stdout();
    let mut presenter = ConsoleJson::new(&mut stdout);
    match config {
        Some(config) => {
            info!("Submitting invoice to {}", config.base_url);
            let client =
                SolidInvoiceClient::new(&config).context("Failed to create SolidInvoice client")?;
            submit_invoice(
                &client,
                &mut presenter,
                args.invoice.invoice_id.as_deref(),
                &invoice,
            )
            .await?;
        }
        None => {
            info!("SolidInvoice is not configured, printing invoice");
            presenter.show_invoice(&invoice)?;
        }
    }

    Ok(())
}
