use crate::domain::ledger::{CashEntry, EntryKind, Product, SalesLog, Summary};
use crate::domain::payload::DecodedPayload;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct SummaryRow {
    income: String,
    expense: String,
    revenue: String,
    stock_cost: String,
    stock_value: String,
    clothes_profit: String,
    cash_balance: String,
    sold_count: usize,
}

#[derive(Serialize)]
struct SaleRow<'a> {
    sold_date: &'a str,
    product_id: &'a str,
    name: &'a str,
    category: &'a str,
    actual_sold_price: String,
    profit: String,
}

#[derive(Serialize)]
struct SalesTotalsRow {
    sold_count: usize,
    total_revenue: String,
    total_profit: String,
}

#[derive(Serialize)]
struct CashEntryRow<'a> {
    date: &'a str,
    #[serde(rename = "type")]
    kind: EntryKind,
    title: &'a str,
    amount: String,
}

#[derive(Serialize)]
struct DecodedRow<'a> {
    payee_sub_tag: &'a str,
    payee: &'a str,
    amount: String,
    checksum: &'a str,
}

#[derive(Serialize)]
struct CatalogRow<'a> {
    product_id: &'a str,
    name: &'a str,
    category: &'a str,
    sell_price: String,
    discount_price: String,
    cost_price: String,
}

/// Writes dashboard reports as CSV. Money columns always carry two decimals.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_summary(&mut self, summary: &Summary) -> Result<()> {
        self.writer.serialize(SummaryRow {
            income: money(summary.income),
            expense: money(summary.expense),
            revenue: money(summary.revenue),
            stock_cost: money(summary.stock_cost),
            stock_value: money(summary.stock_value),
            clothes_profit: money(summary.clothes_profit),
            cash_balance: money(summary.cash_balance),
            sold_count: summary.sold_count,
        })?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_sales(&mut self, log: &SalesLog) -> Result<()> {
        for line in &log.lines {
            let p = &line.product;
            self.writer.serialize(SaleRow {
                sold_date: p.sold_date.as_deref().unwrap_or(""),
                product_id: &p.product_id,
                name: &p.name,
                category: &p.category,
                actual_sold_price: money(p.actual_sold_price),
                profit: money(line.profit),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_sales_totals(&mut self, log: &SalesLog) -> Result<()> {
        self.writer.serialize(SalesTotalsRow {
            sold_count: log.lines.len(),
            total_revenue: money(log.total_revenue),
            total_profit: money(log.total_profit),
        })?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_cash_book(&mut self, entries: &[CashEntry]) -> Result<()> {
        for entry in entries {
            self.writer.serialize(CashEntryRow {
                date: &entry.date,
                kind: entry.kind,
                title: &entry.title,
                amount: money(entry.amount),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_catalog(&mut self, products: &[Product]) -> Result<()> {
        for p in products {
            self.writer.serialize(CatalogRow {
                product_id: &p.product_id,
                name: &p.name,
                category: &p.category,
                sell_price: money(p.sell_price),
                discount_price: money(p.discount_price),
                cost_price: money(p.cost_price),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_decoded(&mut self, decoded: &DecodedPayload) -> Result<()> {
        self.writer.serialize(DecodedRow {
            payee_sub_tag: &decoded.payee_sub_tag,
            payee: &decoded.payee,
            amount: decoded.amount.map(money).unwrap_or_default(),
            checksum: &decoded.checksum,
        })?;
        self.writer.flush()?;
        Ok(())
    }
}

fn money(value: Decimal) -> String {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}
