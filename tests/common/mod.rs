use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const PRODUCT_HEADER: [&str; 10] = [
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

/// Writes a `products.csv` with `rows` items into `dir`. Every third item is
/// sold; costs are 100 and sold items went for 150.
pub fn generate_products(dir: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(dir.join("products.csv"))?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(PRODUCT_HEADER)?;

    for i in 1..=rows {
        let sold = i % 3 == 0;
        let id = format!("P{:05}", i);
        let name = format!("Item {}", i);
        let sold_date = if sold {
            format!("2024-01-{:02} 10:00:00", (i % 28) + 1)
        } else {
            String::new()
        };
        wtr.write_record([
            id.as_str(),
            name.as_str(),
            if i % 2 == 0 { "Nike" } else { "Uniqlo" },
            "",
            "200",
            "150",
            "100",
            if sold { "Sold" } else { "Available" },
            if sold { "150" } else { "0" },
            sold_date.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Copies the checked-in shop fixture into `dir`.
pub fn copy_shop_fixture(dir: &Path) -> Result<(), Error> {
    for sheet in ["products.csv", "transactions.csv"] {
        std::fs::copy(Path::new("tests/fixtures/shop").join(sheet), dir.join(sheet))?;
    }
    Ok(())
}
