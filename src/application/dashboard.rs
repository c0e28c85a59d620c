use super::encoder::PaymentEncoder;
use crate::domain::ledger::{
    self, CashEntry, PRODUCTS_SHEET, PriceCheck, Product, SalesLog, Summary, TRANSACTIONS_SHEET,
};
use crate::domain::payload::Payload;
use crate::domain::ports::{SheetStore, SheetStoreBox};
use crate::error::{Result, ShopError};
use rust_decimal::Decimal;

/// A payment request for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct Charge {
    pub product: Product,
    pub price: Decimal,
    pub check: PriceCheck,
    pub payload: Payload,
}

/// The shop's books: metrics, listings, the cash book and payment requests,
/// all computed from whatever the sheet store currently holds.
pub struct Dashboard {
    store: SheetStoreBox,
    encoder: PaymentEncoder,
}

impl Dashboard {
    pub fn new(store: SheetStoreBox, encoder: PaymentEncoder) -> Self {
        Self { store, encoder }
    }

    pub async fn cash_entries(&self) -> Result<Vec<CashEntry>> {
        let records = self.store.read(TRANSACTIONS_SHEET).await?;
        records.iter().map(CashEntry::from_record).collect()
    }

    /// Cash entries, most recently added first.
    pub async fn cash_book(&self) -> Result<Vec<CashEntry>> {
        let mut entries = self.cash_entries().await?;
        entries.reverse();
        Ok(entries)
    }

    /// Appends `entry` to the transactions sheet.
    pub async fn add_entry(&self, entry: CashEntry) -> Result<()> {
        let mut records = self.store.read(TRANSACTIONS_SHEET).await?;
        records.push(entry.to_record());
        self.store.write(TRANSACTIONS_SHEET, records).await?;
        tracing::info!(kind = ?entry.kind, amount = %entry.amount, title = %entry.title, "added cash entry");
        Ok(())
    }

    pub async fn products(&self) -> Result<Vec<Product>> {
        let records = self.store.read(PRODUCTS_SHEET).await?;
        records.iter().map(Product::from_record).collect()
    }

    pub async fn summary(&self) -> Result<Summary> {
        let entries = self.cash_entries().await?;
        let products = self.products().await?;
        let summary = Summary::compute(&entries, &products);
        tracing::debug!(
            entries = entries.len(),
            products = products.len(),
            sold = summary.sold_count,
            "computed summary"
        );
        Ok(summary)
    }

    pub async fn sales_log(&self) -> Result<SalesLog> {
        Ok(SalesLog::from_products(&self.products().await?))
    }

    pub async fn catalog(&self, category: Option<&str>, query: Option<&str>) -> Result<Vec<Product>> {
        let products = self.products().await?;
        Ok(ledger::catalog(&products, category, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn categories(&self) -> Result<Vec<String>> {
        Ok(ledger::categories(&self.products().await?))
    }

    async fn available_product(&self, product_id: &str) -> Result<Product> {
        self.products()
            .await?
            .into_iter()
            .find(|p| p.product_id == product_id && p.is_available())
            .ok_or_else(|| ShopError::NotFound(format!("available product '{}'", product_id)))
    }

    /// Listing caption for an available product.
    pub async fn caption(&self, product_id: &str) -> Result<String> {
        Ok(self.available_product(product_id).await?.caption())
    }

    /// Builds a payment payload for an available product, at its sell price
    /// unless `price` overrides it.
    pub async fn charge(
        &self,
        product_id: &str,
        payee: &str,
        price: Option<Decimal>,
    ) -> Result<Charge> {
        let product = self.available_product(product_id).await?;

        let price = price.unwrap_or(product.sell_price);
        let check = product.check_price(price);
        match check {
            PriceCheck::Loss => {
                tracing::warn!(product = %product.product_id, %price, cost = %product.cost_price, "charging below cost")
            }
            PriceCheck::BelowFloor => {
                tracing::warn!(product = %product.product_id, %price, floor = %product.discount_price, "charging below floor price")
            }
            PriceCheck::Ok => {}
        }

        let payload = self.encoder.encode(payee, Some(price))?;
        Ok(Charge {
            product,
            price,
            check,
            payload,
        })
    }
}

/// Copies every sheet of `from` into `to`, replacing what `to` held.
/// Returns the number of sheets copied.
pub async fn import_sheets(from: &dyn SheetStore, to: &dyn SheetStore) -> Result<usize> {
    let sheets = from.sheets().await?;
    for sheet in &sheets {
        let records = from.read(sheet).await?;
        tracing::debug!(sheet = %sheet, rows = records.len(), "importing sheet");
        to.write(sheet, records).await?;
    }
    Ok(sheets.len())
}
