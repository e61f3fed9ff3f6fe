use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use brewgen_core::{CustomerRecord, DrinkRecord, OrderRecord};

pub const ORDERS_FILE: &str = "orders.csv";
pub const DRINKS_FILE: &str = "drinks.csv";
pub const CUSTOMERS_FILE: &str = "customers.csv";

pub const ORDERS_HEADER: [&str; 8] = [
    "orderID",
    "orderPrice",
    "salesTax",
    "orderDate",
    "orderTime",
    "tips",
    "employeeID",
    "customerID",
];

pub const DRINKS_HEADER: [&str; 10] = [
    "drinkID",
    "orderID",
    "itemID",
    "cupSize",
    "sugarLevel",
    "iceAmount",
    "topping1",
    "topping2",
    "totalDrinkPrice",
    "quantity",
];

pub const CUSTOMERS_HEADER: [&str; 5] = [
    "customerID",
    "firstName",
    "lastName",
    "phoneNumber",
    "loyaltyPoints",
];

/// Write the orders table, returning bytes written.
pub fn write_orders_csv(path: &Path, orders: &[OrderRecord]) -> Result<u64, csv::Error> {
    write_rows(
        path,
        &ORDERS_HEADER,
        orders.iter().map(|order| {
            vec![
                order.id.to_string(),
                money(order.total_price),
                money(order.sales_tax),
                order.date().format("%Y-%m-%d").to_string(),
                order.time().format("%H:%M:%S").to_string(),
                order.tips.to_string(),
                order.employee_id.to_string(),
                order.customer_id.to_string(),
            ]
        }),
    )
}

/// Write the drinks table; absent toppings become empty fields.
pub fn write_drinks_csv(path: &Path, drinks: &[DrinkRecord]) -> Result<u64, csv::Error> {
    write_rows(
        path,
        &DRINKS_HEADER,
        drinks.iter().map(|drink| {
            vec![
                drink.id.to_string(),
                drink.order_id.to_string(),
                drink.item_id.to_string(),
                drink.cup_size_id.to_string(),
                drink.sugar_level_id.to_string(),
                drink.ice_amount_id.to_string(),
                optional_id(drink.topping1_id),
                optional_id(drink.topping2_id),
                money(drink.total_drink_price),
                drink.quantity.to_string(),
            ]
        }),
    )
}

pub fn write_customers_csv(path: &Path, customers: &[CustomerRecord]) -> Result<u64, csv::Error> {
    write_rows(
        path,
        &CUSTOMERS_HEADER,
        customers.iter().map(|customer| {
            vec![
                customer.id.to_string(),
                customer.first_name.clone(),
                customer.last_name.clone(),
                customer.phone_number.clone(),
                customer.loyalty_points.to_string(),
            ]
        }),
    )
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn optional_id(id: Option<u32>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

/// Header first, then rows; the file is synced before returning.
fn write_rows<I>(path: &Path, header: &[&str], rows: I) -> Result<u64, csv::Error>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(header)?;
    for record in rows {
        writer.write_record(&record)?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    let bytes = counting.bytes_written();
    let file = counting
        .into_inner()
        .into_inner()
        .map_err(|err| err.into_error())?;
    file.sync_all()?;
    Ok(bytes)
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }

    fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
