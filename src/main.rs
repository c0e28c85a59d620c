use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use shopqr::application::dashboard::{Dashboard, import_sheets};
use shopqr::application::encoder::PaymentEncoder;
use shopqr::config::{ENV_DATA_DIR, ENV_DB_PATH, ENV_MODE, ENV_PAYEE, Settings, StoreBackend};
use shopqr::domain::amount::parse_decimal;
use shopqr::domain::ledger::{CashEntry, EntryKind};
use shopqr::domain::payload::EncodeMode;
use shopqr::error::ShopError;
use shopqr::infrastructure::csv_dir::CsvSheetStore;
use shopqr::infrastructure::open_store;
use shopqr::interfaces::csv::report_writer::ReportWriter;
use shopqr::interfaces::qr::render_terminal;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// How strictly payee identifiers and amounts are validated.
    #[arg(long, value_enum, env = ENV_MODE, default_value_t = EncodeMode::Standard, global = true)]
    mode: EncodeMode,

    /// Directory of `<sheet>.csv` files holding the shop's books.
    #[arg(long, env = ENV_DATA_DIR, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = ENV_DB_PATH, global = true)]
    db_path: Option<PathBuf>,

    /// Default payee identifier (mobile number, national ID or e-wallet ID).
    #[arg(long, env = ENV_PAYEE, global = true)]
    payee: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the payment QR payload for a payee
    Encode {
        /// Payee identifier; falls back to --payee
        identifier: Option<String>,
        /// Fixed amount; omit to let the payer enter it
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// Also draw the QR code
        #[arg(long)]
        qr: bool,
    },
    /// Check a payload's checksum and print what it encodes
    Verify { payload: String },
    /// Print profit, cash balance and stock value
    Summary,
    /// List sold items, newest first
    Sold {
        /// Print sale count, total sales and total profit instead
        #[arg(long)]
        totals: bool,
    },
    /// List available items
    Shop {
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive match on product id or name
        #[arg(long)]
        query: Option<String>,
        /// List categories instead of items
        #[arg(long)]
        categories: bool,
        /// Print the listing caption for one product instead
        #[arg(long, value_name = "PRODUCT_ID")]
        caption: Option<String>,
    },
    /// Income and expenses not tied to a product
    Transactions {
        #[command(subcommand)]
        action: TransactionsCommand,
    },
    /// Print the payment payload for an available product
    Charge {
        product_id: String,
        /// Sell at this price instead of the listed one
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        qr: bool,
    },
    /// Copy every sheet from a CSV directory into the configured store
    Import { from: PathBuf },
}

#[derive(Subcommand)]
enum TransactionsCommand {
    /// Append an entry to the cash book
    Add {
        /// income/expense, or รายรับ/รายจ่าย
        kind: EntryKind,
        title: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List entries, most recently added first
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    let settings = Settings::resolve(cli.mode, cli.data_dir, cli.db_path, cli.payee);
    let encoder = PaymentEncoder::new(settings.encoder);
    let open_dashboard = || -> Result<Dashboard> {
        let store = open_store(&settings.backend).into_diagnostic()?;
        Ok(Dashboard::new(store, encoder))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Encode {
            identifier,
            amount,
            qr,
        } => {
            let payee = identifier
                .or(settings.payee)
                .ok_or(ShopError::EmptyIdentifier)
                .into_diagnostic()?;
            let payload = encoder
                .encode_text(&payee, amount.as_deref())
                .into_diagnostic()?;
            writeln!(out, "{}", payload).into_diagnostic()?;
            if qr {
                writeln!(out, "{}", render_terminal(payload.as_str()).into_diagnostic()?)
                    .into_diagnostic()?;
            }
        }
        Command::Verify { payload } => {
            let decoded = encoder.verify(&payload).into_diagnostic()?;
            ReportWriter::new(out)
                .write_decoded(&decoded)
                .into_diagnostic()?;
        }
        Command::Summary => {
            let dashboard = open_dashboard()?;
            let summary = dashboard.summary().await.into_diagnostic()?;
            ReportWriter::new(out)
                .write_summary(&summary)
                .into_diagnostic()?;
        }
        Command::Sold { totals } => {
            let dashboard = open_dashboard()?;
            let log = dashboard.sales_log().await.into_diagnostic()?;
            let mut report = ReportWriter::new(out);
            if totals {
                report.write_sales_totals(&log).into_diagnostic()?;
            } else {
                report.write_sales(&log).into_diagnostic()?;
            }
        }
        Command::Shop {
            category,
            query,
            categories,
            caption,
        } => {
            let dashboard = open_dashboard()?;
            if let Some(product_id) = caption {
                let text = dashboard.caption(&product_id).await.into_diagnostic()?;
                writeln!(out, "{}", text).into_diagnostic()?;
            } else if categories {
                for category in dashboard.categories().await.into_diagnostic()? {
                    writeln!(out, "{}", category).into_diagnostic()?;
                }
            } else {
                let items = dashboard
                    .catalog(category.as_deref(), query.as_deref())
                    .await
                    .into_diagnostic()?;
                ReportWriter::new(out)
                    .write_catalog(&items)
                    .into_diagnostic()?;
            }
        }
        Command::Transactions { action } => {
            let dashboard = open_dashboard()?;
            match action {
                TransactionsCommand::Add {
                    kind,
                    title,
                    amount,
                    date,
                } => {
                    let amount = parse_decimal(&amount).into_diagnostic()?;
                    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
                    let entry = CashEntry::new(date.format("%Y-%m-%d").to_string(), kind, title, amount)
                        .into_diagnostic()?;
                    dashboard.add_entry(entry).await.into_diagnostic()?;
                    if settings.backend == StoreBackend::InMemory {
                        tracing::warn!("no --data-dir or --db-path given, the entry will not be kept");
                    }
                }
                TransactionsCommand::List => {
                    let entries = dashboard.cash_book().await.into_diagnostic()?;
                    ReportWriter::new(out)
                        .write_cash_book(&entries)
                        .into_diagnostic()?;
                }
            }
        }
        Command::Charge {
            product_id,
            price,
            qr,
        } => {
            let payee = settings
                .payee
                .ok_or(ShopError::EmptyIdentifier)
                .into_diagnostic()?;
            let price = price
                .as_deref()
                .map(parse_decimal)
                .transpose()
                .into_diagnostic()?;
            let dashboard = open_dashboard()?;
            let charge = dashboard
                .charge(&product_id, &payee, price)
                .await
                .into_diagnostic()?;
            writeln!(out, "{}", charge.payload).into_diagnostic()?;
            if qr {
                writeln!(
                    out,
                    "{}",
                    render_terminal(charge.payload.as_str()).into_diagnostic()?
                )
                .into_diagnostic()?;
            }
        }
        Command::Import { from } => {
            if settings.backend == StoreBackend::InMemory {
                tracing::warn!("no --data-dir or --db-path given, imported sheets will not be kept");
            }
            if !from.is_dir() {
                return Err(ShopError::NotFound(format!("directory {}", from.display())))
                    .into_diagnostic();
            }
            let source = CsvSheetStore::open(&from).into_diagnostic()?;
            let target = open_store(&settings.backend).into_diagnostic()?;
            let copied = import_sheets(&source, target.as_ref())
                .await
                .into_diagnostic()?;
            writeln!(out, "imported {} sheets", copied).into_diagnostic()?;
        }
    }

    Ok(())
}
