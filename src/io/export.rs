use std::io::Write;

use anyhow::Result;

use crate::application::StoreDirectory;

/// Exporter for converting store reference data to CSV.
pub struct Exporter<'a> {
    directory: &'a StoreDirectory,
}

impl<'a> Exporter<'a> {
    pub fn new(directory: &'a StoreDirectory) -> Self {
        Self { directory }
    }

    /// Export the product catalog to CSV format.
    pub fn export_products_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "code",
            "name",
            "unit",
            "quantity",
            "buying_price",
            "selling_price_retail",
            "selling_price_wholesale",
        ])?;

        let mut count = 0;
        for product in self.directory.catalog.products() {
            csv_writer.write_record(&[
                product.product_id.to_string(),
                product.product_code.clone(),
                product.product_name.clone(),
                product.unit.unit_name.clone(),
                product.quantity.to_string(),
                product.buying_price.to_string(),
                product.selling_price_retail.to_string(),
                product.selling_price_wholesale.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the customer list to CSV format.
    pub fn export_customers_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "name", "mobile", "address"])?;

        let mut count = 0;
        for customer in &self.directory.customers {
            csv_writer.write_record(&[
                customer.customer_id.to_string(),
                customer.customer_name.clone(),
                customer.mobile_number.clone(),
                customer.address.clone(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}
