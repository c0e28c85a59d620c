use super::amount::parse_decimal;
use super::ports::Record;
use crate::error::{Result, ShopError};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

pub const TRANSACTIONS_SHEET: &str = "transactions";
pub const PRODUCTS_SHEET: &str = "products";

pub const TRANSACTION_COLUMNS: &[&str] = &["date", "type", "title", "amount"];
pub const PRODUCT_COLUMNS: &[&str] = &[
    "product_id",
    "name",
    "category",
    "image",
    "sell_price",
    "discount_price",
    "cost_price",
    "status",
    "actual_sold_price",
    "sold_date",
];

/// Columns a known sheet starts with; empty for sheets the shop does not define.
pub fn sheet_columns(sheet: &str) -> &'static [&'static str] {
    match sheet {
        TRANSACTIONS_SHEET => TRANSACTION_COLUMNS,
        PRODUCTS_SHEET => PRODUCT_COLUMNS,
        _ => &[],
    }
}

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
/// Category filter value that matches every product.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "รายรับ" => Ok(EntryKind::Income),
            "รายจ่าย" => Ok(EntryKind::Expense),
            other if other.eq_ignore_ascii_case("income") => Ok(EntryKind::Income),
            other if other.eq_ignore_ascii_case("expense") => Ok(EntryKind::Expense),
            other => Err(format!("unknown entry type '{}'", other)),
        }
    }
}

/// A general cash movement not tied to a product: capital, rent, utilities.
#[derive(Debug, Clone, PartialEq)]
pub struct CashEntry {
    pub date: String,
    pub kind: EntryKind,
    pub title: String,
    pub amount: Decimal,
}

impl CashEntry {
    /// A new entry for the cash book. The amount may not be negative; the
    /// kind carries the direction.
    pub fn new(date: String, kind: EntryKind, title: String, amount: Decimal) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ShopError::InvalidAmount(format!(
                "cash entry amount must not be negative, got {}",
                amount
            )));
        }
        Ok(Self {
            date,
            kind,
            title,
            amount,
        })
    }

    pub fn from_record(record: &Record) -> Result<Self> {
        let kind = text(record, "type")
            .parse()
            .map_err(|reason| invalid(TRANSACTIONS_SHEET, reason))?;
        Ok(Self {
            date: text(record, "date").to_string(),
            kind,
            title: text(record, "title").to_string(),
            amount: decimal(record, "amount", TRANSACTIONS_SHEET)?,
        })
    }

    pub fn to_record(&self) -> Record {
        let kind = match self.kind {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        };
        Record::from([
            ("date".to_string(), self.date.clone()),
            ("type".to_string(), kind.to_string()),
            ("title".to_string(), self.title.clone()),
            ("amount".to_string(), self.amount.to_string()),
        ])
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum ProductStatus {
    Available,
    Sold,
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("available") => Ok(ProductStatus::Available),
            s if s.eq_ignore_ascii_case("sold") => Ok(ProductStatus::Sold),
            other => Err(format!("unknown product status '{}'", other)),
        }
    }
}

/// Outcome of checking a sale price against a product's cost and floor.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PriceCheck {
    Ok,
    /// Below the floor price but still above cost.
    BelowFloor,
    /// Below cost.
    Loss,
}

/// One clothing item in stock or already sold.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub image: String,
    pub sell_price: Decimal,
    /// Lowest acceptable price.
    pub discount_price: Decimal,
    pub cost_price: Decimal,
    pub status: ProductStatus,
    pub actual_sold_price: Decimal,
    pub sold_date: Option<String>,
}

impl Product {
    pub fn from_record(record: &Record) -> Result<Self> {
        let product_id = text(record, "product_id").to_string();
        if product_id.is_empty() {
            return Err(invalid(PRODUCTS_SHEET, "missing product_id".to_string()));
        }
        let status = text(record, "status")
            .parse()
            .map_err(|reason| invalid(PRODUCTS_SHEET, reason))?;
        let category = match text(record, "category") {
            "" => DEFAULT_CATEGORY.to_string(),
            c => c.to_string(),
        };
        let sold_date = match text(record, "sold_date") {
            "" => None,
            d => Some(d.to_string()),
        };
        Ok(Self {
            product_id,
            name: text(record, "name").to_string(),
            category,
            image: text(record, "image").to_string(),
            sell_price: decimal(record, "sell_price", PRODUCTS_SHEET)?,
            discount_price: decimal(record, "discount_price", PRODUCTS_SHEET)?,
            cost_price: decimal(record, "cost_price", PRODUCTS_SHEET)?,
            status,
            actual_sold_price: decimal(record, "actual_sold_price", PRODUCTS_SHEET)?,
            sold_date,
        })
    }

    pub fn to_record(&self) -> Record {
        let status = match self.status {
            ProductStatus::Available => "Available",
            ProductStatus::Sold => "Sold",
        };
        Record::from([
            ("product_id".to_string(), self.product_id.clone()),
            ("name".to_string(), self.name.clone()),
            ("category".to_string(), self.category.clone()),
            ("image".to_string(), self.image.clone()),
            ("sell_price".to_string(), self.sell_price.to_string()),
            ("discount_price".to_string(), self.discount_price.to_string()),
            ("cost_price".to_string(), self.cost_price.to_string()),
            ("status".to_string(), status.to_string()),
            (
                "actual_sold_price".to_string(),
                self.actual_sold_price.to_string(),
            ),
            (
                "sold_date".to_string(),
                self.sold_date.clone().unwrap_or_default(),
            ),
        ])
    }

    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Available
    }

    /// Realized profit, only for sold items.
    pub fn profit(&self) -> Option<Decimal> {
        (self.status == ProductStatus::Sold).then(|| self.actual_sold_price - self.cost_price)
    }

    pub fn check_price(&self, price: Decimal) -> PriceCheck {
        if price < self.cost_price {
            PriceCheck::Loss
        } else if price < self.discount_price {
            PriceCheck::BelowFloor
        } else {
            PriceCheck::Ok
        }
    }

    /// Ready-to-post listing text for social media.
    pub fn caption(&self) -> String {
        format!(
            "🔥 {name}\n\
             📂 Brand: {category}\n\
             💵 Price: {price}.-\n\
             \n\
             📏 Size: (ระบุไซส์) / ยาว (ระบุ)\n\
             ✨ Condition: 9.5/10 (ซักรีดหอมพร้อมใส่)\n\
             __________________________\n\
             🚚 ค่าส่ง 50.- (พื้นที่ห่างไกล +20)\n\
             📩 สนใจทัก DM หรือพิมพ์จองได้เลยครับ\n\
             \n\
             #HighClass #{tag} #เสื้อผ้ามือสอง #VintageStyle",
            name = self.name,
            category = self.category,
            price = whole_baht(self.sell_price),
            tag = self.category.replace(' ', ""),
        )
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.product_id.to_lowercase().contains(&query) || self.name.to_lowercase().contains(&query)
    }
}

/// Headline figures of the dashboard.
///
/// Stock is paid for when it is added, so every product's cost leaves the
/// cash balance immediately and sales bring their actual price back in.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
    pub revenue: Decimal,
    pub stock_cost: Decimal,
    pub stock_value: Decimal,
    pub clothes_profit: Decimal,
    pub cash_balance: Decimal,
    pub sold_count: usize,
}

impl Summary {
    pub fn compute(entries: &[CashEntry], products: &[Product]) -> Self {
        let sum_entries = |kind| {
            entries
                .iter()
                .filter(|e| e.kind == kind)
                .map(|e| e.amount)
                .sum::<Decimal>()
        };
        let income = sum_entries(EntryKind::Income);
        let expense = sum_entries(EntryKind::Expense);

        let sold: Vec<&Product> = products.iter().filter(|p| !p.is_available()).collect();
        let revenue: Decimal = sold.iter().map(|p| p.actual_sold_price).sum();
        let sold_cost: Decimal = sold.iter().map(|p| p.cost_price).sum();
        let stock_cost: Decimal = products.iter().map(|p| p.cost_price).sum();
        let stock_value: Decimal = products
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.cost_price)
            .sum();

        Self {
            income,
            expense,
            revenue,
            stock_cost,
            stock_value,
            clothes_profit: revenue - sold_cost,
            cash_balance: (income + revenue) - (expense + stock_cost),
            sold_count: sold.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleLine {
    pub product: Product,
    pub profit: Decimal,
}

/// Sold products, newest sale first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesLog {
    pub lines: Vec<SaleLine>,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
}

impl SalesLog {
    pub fn from_products(products: &[Product]) -> Self {
        let mut lines: Vec<SaleLine> = products
            .iter()
            .filter_map(|p| {
                p.profit().map(|profit| SaleLine {
                    product: p.clone(),
                    profit,
                })
            })
            .collect();
        // Newest first; rows without a date go last.
        lines.sort_by(|a, b| match (&a.product.sold_date, &b.product.sold_date) {
            (Some(x), Some(y)) => y.cmp(x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        let total_revenue = lines.iter().map(|l| l.product.actual_sold_price).sum();
        let total_profit = lines.iter().map(|l| l.profit).sum();
        Self {
            lines,
            total_revenue,
            total_profit,
        }
    }
}

/// Available products in a category (or [`ALL_CATEGORIES`]) whose id or name
/// contains `query`, ignoring case.
pub fn catalog<'a>(
    products: &'a [Product],
    category: Option<&str>,
    query: Option<&str>,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.is_available())
        .filter(|p| match category {
            None | Some(ALL_CATEGORIES) => true,
            Some(c) => p.category == c,
        })
        .filter(|p| query.is_none_or(|q| q.is_empty() || p.matches(q)))
        .collect()
}

/// Sorted unique categories of available products.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = products
        .iter()
        .filter(|p| p.is_available())
        .map(|p| p.category.clone())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Rounds to whole baht (half to even) and groups thousands: `1250.5` -> `1,250`.
pub fn whole_baht(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.insert(0, '-');
    }
    grouped
}

fn text<'a>(record: &'a Record, key: &str) -> &'a str {
    record.get(key).map(|v| v.trim()).unwrap_or("")
}

fn decimal(record: &Record, key: &str, sheet: &str) -> Result<Decimal> {
    match text(record, key) {
        "" => Ok(Decimal::ZERO),
        value => parse_decimal(value)
            .map_err(|_| invalid(sheet, format!("column '{}' is not a number: '{}'", key, value))),
    }
}

fn invalid(sheet: &str, reason: String) -> ShopError {
    ShopError::InvalidRecord {
        sheet: sheet.to_string(),
        reason,
    }
}
