use std::fs::File;
use std::io::{self, Write as _};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::application::{CatalogDesk, ProductForm, ReturnDesk, StoreDirectory};
use crate::backend::{CustomerApi, LocalStore, SaleApi, SubmissionApi};
use crate::domain::{
    format_rupees, parse_paise, CustomerChoice, DraftEntry, NewCustomer, PaymentMode, SaleData,
    SaleType,
};
use crate::io::{render_receipt, Exporter, StoreInfo};

/// Bottega - Store Return & Catalog Ledger
#[derive(Parser)]
#[command(name = "bottega")]
#[command(about = "A local-first return-bill and catalog ledger for a small retail store")]
#[command(version)]
pub struct Cli {
    /// Store file path
    #[arg(short, long, default_value = "bottega.json")]
    pub store: String,

    /// Receipt header config (JSON file with name, phone, gstin)
    #[arg(long)]
    pub store_info: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new store file
    Init,

    /// Product catalog commands
    #[command(subcommand)]
    Product(ProductCommands),

    /// Measurement unit commands
    #[command(subcommand)]
    Unit(UnitCommands),

    /// Customer commands
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Sale commands
    #[command(subcommand)]
    Sale(SaleCommands),

    /// Return bill commands
    #[command(subcommand)]
    Return(ReturnCommands),

    /// Export store data as CSV
    #[command(subcommand)]
    Export(ExportCommands),
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Add a product to the catalog
    Add {
        /// Product name
        name: String,

        /// Product code (defaults to the next code in sequence)
        #[arg(long)]
        code: Option<String>,

        /// Unit name (defaults to the first registered unit)
        #[arg(long)]
        unit: Option<String>,

        /// Stock quantity
        #[arg(long)]
        qty: Option<f64>,

        /// Buying price (e.g., "30.00")
        #[arg(long)]
        buy: Option<String>,

        /// Retail selling price
        #[arg(long)]
        retail: Option<String>,

        /// Wholesale selling price
        #[arg(long)]
        wholesale: Option<String>,
    },

    /// List the catalog
    List,

    /// Update a product (fields left out keep their values)
    Update {
        /// Product id
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        unit: Option<String>,

        #[arg(long)]
        qty: Option<f64>,

        #[arg(long)]
        buy: Option<String>,

        #[arg(long)]
        retail: Option<String>,

        #[arg(long)]
        wholesale: Option<String>,
    },

    /// Delete a product
    Delete {
        /// Product id
        id: i64,
    },

    /// Show the code the next product will get
    NextCode,
}

#[derive(Subcommand)]
pub enum UnitCommands {
    /// Register a measurement unit (kg, pcs, ...)
    Add {
        /// Unit name
        name: String,
    },

    /// List registered units
    List,
}

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Add a customer
    Add {
        /// Customer name
        name: String,

        /// Mobile number
        mobile: String,

        /// Address
        address: String,
    },

    /// List customers
    List,
}

#[derive(Subcommand)]
pub enum SaleCommands {
    /// Record a sale (sales are what return bills reference)
    Add {
        /// Customer id
        #[arg(long)]
        customer: i64,

        /// Gross total (e.g., "250.00")
        #[arg(long)]
        total: String,

        /// Sale date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Sale type: retail or wholesale
        #[arg(long = "type", default_value = "retail")]
        sale_type: String,

        /// Payment mode: cash or online
        #[arg(long, default_value = "cash")]
        mode: String,
    },

    /// List sales eligible for return
    List,
}

#[derive(Subcommand)]
pub enum ReturnCommands {
    /// Create a return bill against a sale
    Create {
        /// Sale id the return is against
        #[arg(long)]
        sale: i64,

        /// Existing customer id
        #[arg(long)]
        customer: Option<i64>,

        /// New customer as "name,mobile,address"
        #[arg(long)]
        new_customer: Option<String>,

        /// Return date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Return type: retail or wholesale
        #[arg(long = "type", default_value = "retail")]
        return_type: String,

        /// Payment mode: cash or online
        #[arg(long, default_value = "cash")]
        mode: String,

        /// Return item as "PRODUCT_ID:QTY:PRICE" (repeatable)
        #[arg(long = "item")]
        items: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List created return bills
    List,
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export the product catalog
    Products {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Export the customer list
    Customers {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LocalStore::init(&self.store)?;
                println!("Store initialized: {}", self.store);
            }

            Commands::Product(cmd) => {
                let store = LocalStore::open(&self.store)?;
                run_product_command(&store, cmd).await?;
            }

            Commands::Unit(cmd) => {
                let store = LocalStore::open(&self.store)?;
                run_unit_command(&store, cmd).await?;
            }

            Commands::Customer(cmd) => {
                let store = LocalStore::open(&self.store)?;
                run_customer_command(&store, cmd).await?;
            }

            Commands::Sale(cmd) => {
                let store = LocalStore::open(&self.store)?;
                run_sale_command(&store, cmd).await?;
            }

            Commands::Return(cmd) => {
                let store = LocalStore::open(&self.store)?;
                let info = match &self.store_info {
                    Some(path) => StoreInfo::from_file(path)?,
                    None => StoreInfo::default(),
                };
                run_return_command(&store, &info, cmd).await?;
            }

            Commands::Export(cmd) => {
                let store = LocalStore::open(&self.store)?;
                run_export_command(&store, cmd).await?;
            }
        }
        Ok(())
    }
}

async fn run_product_command(store: &LocalStore, cmd: ProductCommands) -> Result<()> {
    let mut desk = CatalogDesk::load(store).await?;

    match cmd {
        ProductCommands::Add {
            name,
            code,
            unit,
            qty,
            buy,
            retail,
            wholesale,
        } => {
            let form = ProductForm {
                product_name: Some(name),
                product_code: code,
                unit_name: unit,
                quantity: qty,
                buying_price: parse_price(buy)?,
                selling_price_retail: parse_price(retail)?,
                selling_price_wholesale: parse_price(wholesale)?,
            };
            let product = desk.create_product(store, &form).await?;
            println!(
                "Created product: {} [{}] (id {})",
                product.product_name, product.product_code, product.product_id
            );
        }

        ProductCommands::List => {
            let products = desk.catalog().products();
            if products.is_empty() {
                println!("No products found.");
            } else {
                println!(
                    "{:<5} {:<10} {:<20} {:<6} {:>8} {:>10} {:>10}",
                    "ID", "CODE", "NAME", "UNIT", "STOCK", "RETAIL", "WHOLESALE"
                );
                println!("{}", "-".repeat(76));
                for product in products {
                    println!(
                        "{:<5} {:<10} {:<20} {:<6} {:>8} {:>10} {:>10}",
                        product.product_id,
                        product.product_code,
                        product.product_name,
                        product.unit.unit_name,
                        product.quantity,
                        format_rupees(product.selling_price_retail),
                        format_rupees(product.selling_price_wholesale),
                    );
                }
            }
        }

        ProductCommands::Update {
            id,
            name,
            code,
            unit,
            qty,
            buy,
            retail,
            wholesale,
        } => {
            let form = ProductForm {
                product_name: name,
                product_code: code,
                unit_name: unit,
                quantity: qty,
                buying_price: parse_price(buy)?,
                selling_price_retail: parse_price(retail)?,
                selling_price_wholesale: parse_price(wholesale)?,
            };
            let product = desk.update_product(store, id, &form).await?;
            println!(
                "Updated product: {} [{}]",
                product.product_name, product.product_code
            );
        }

        ProductCommands::Delete { id } => {
            desk.delete_product(store, id).await?;
            println!("Deleted product: {}", id);
        }

        ProductCommands::NextCode => {
            println!("{}", desk.next_code());
        }
    }
    Ok(())
}

async fn run_unit_command(store: &LocalStore, cmd: UnitCommands) -> Result<()> {
    match cmd {
        UnitCommands::Add { name } => {
            let unit = store.add_unit(&name)?;
            println!("Registered unit: {} (id {})", unit.unit_name, unit.unit_id);
        }

        UnitCommands::List => {
            let desk = CatalogDesk::load(store).await?;
            if desk.units().is_empty() {
                println!("No units registered.");
            } else {
                for unit in desk.units() {
                    println!("{:<5} {}", unit.unit_id, unit.unit_name);
                }
            }
        }
    }
    Ok(())
}

async fn run_customer_command(store: &LocalStore, cmd: CustomerCommands) -> Result<()> {
    match cmd {
        CustomerCommands::Add {
            name,
            mobile,
            address,
        } => {
            let customer = store
                .create_customer(&NewCustomer::new(name, mobile, address))
                .await?;
            println!(
                "Created customer: {} (id {})",
                customer.customer_name, customer.customer_id
            );
        }

        CustomerCommands::List => {
            let customers = store.list_customers().await?;
            if customers.is_empty() {
                println!("No customers found.");
            } else {
                println!("{:<5} {:<20} {:<14} {}", "ID", "NAME", "MOBILE", "ADDRESS");
                println!("{}", "-".repeat(60));
                for customer in customers {
                    println!(
                        "{:<5} {:<20} {:<14} {}",
                        customer.customer_id,
                        customer.customer_name,
                        customer.mobile_number,
                        customer.address
                    );
                }
            }
        }
    }
    Ok(())
}

async fn run_sale_command(store: &LocalStore, cmd: SaleCommands) -> Result<()> {
    match cmd {
        SaleCommands::Add {
            customer,
            total,
            date,
            sale_type,
            mode,
        } => {
            let sale_date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => Utc::now(),
            };
            let data = SaleData {
                customer_id: customer,
                sale_date,
                sale_type: parse_sale_type(&sale_type)?,
                payment_mode: parse_payment_mode(&mode)?,
                gross_total: parse_paise(&total)
                    .context("Invalid total format. Use '250.00' or '250'")?,
            };
            let sale = store.create_sale(&data).await?;
            println!(
                "Recorded sale #{}: {} ({})",
                sale.sale_id,
                format_rupees(sale.gross_total),
                sale.payment_mode
            );
        }

        SaleCommands::List => {
            let sales = store.list_sales().await?;
            if sales.is_empty() {
                println!("No sales found.");
            } else {
                println!(
                    "{:<6} {:<10} {:<12} {:<10} {:>12}",
                    "ID", "CUSTOMER", "DATE", "MODE", "TOTAL"
                );
                println!("{}", "-".repeat(54));
                for sale in sales {
                    println!(
                        "{:<6} {:<10} {:<12} {:<10} {:>12}",
                        sale.sale_id,
                        sale.customer_id,
                        sale.sale_date.format("%Y-%m-%d"),
                        sale.payment_mode,
                        format_rupees(sale.gross_total),
                    );
                }
            }
        }
    }
    Ok(())
}

async fn run_return_command(store: &LocalStore, info: &StoreInfo, cmd: ReturnCommands) -> Result<()> {
    match cmd {
        ReturnCommands::Create {
            sale,
            customer,
            new_customer,
            date,
            return_type,
            mode,
            items,
            yes,
        } => {
            let directory = StoreDirectory::load(store).await?;
            let mut desk = ReturnDesk::new(directory);

            let form = desk.form_mut();
            form.sale_id = Some(sale);
            form.return_date = Some(parse_date(&date)?);
            form.return_type = parse_sale_type(&return_type)?;
            form.payment_mode = parse_payment_mode(&mode)?;
            form.customer = match (customer, new_customer) {
                (Some(id), _) => Some(CustomerChoice::Existing(id)),
                (None, Some(spec)) => Some(CustomerChoice::New(parse_new_customer(&spec)?)),
                (None, None) => None,
            };

            for spec in &items {
                *desk.draft_mut() = parse_item(spec)?;
                desk.add_item()?;
            }

            let pending = desk.request_submit()?;

            println!("Return bill against sale #{}", pending.sale_id);
            match &pending.customer {
                CustomerChoice::Existing(id) => {
                    // Validated by request_submit, so the lookup succeeds.
                    if let Some(c) = desk.directory().customer(*id) {
                        println!("Customer: {} ({})", c.customer_name, c.mobile_number);
                    }
                }
                CustomerChoice::New(data) => {
                    println!(
                        "New customer: {} ({}), {}",
                        data.customer_name, data.mobile_number, data.address
                    );
                }
            }
            println!(
                "Date: {} | Type: {} | Payment: {}",
                pending.return_date.format("%Y-%m-%d"),
                pending.return_type,
                pending.payment_mode
            );
            for (index, item) in desk.ledger().items().iter().enumerate() {
                println!(
                    "  {}. {} {} x {} = {}",
                    index + 1,
                    item.product.product_name,
                    item.quantity,
                    format_rupees(item.price),
                    format_rupees(item.total_price),
                );
            }
            println!("Total: {}", format_rupees(pending.total));

            if !yes && !confirm("Create this return bill?")? {
                desk.cancel_submit()?;
                println!("Cancelled.");
                return Ok(());
            }

            let created = desk.confirm_submit(store).await?;
            println!("Created return bill #{}", created.return_id);
            println!();
            print!("{}", render_receipt(&created, info));
        }

        ReturnCommands::List => {
            let returns = store.list_returns().await?;
            if returns.is_empty() {
                println!("No return bills found.");
            } else {
                println!(
                    "{:<6} {:<6} {:<20} {:<12} {:>12}",
                    "ID", "SALE", "CUSTOMER", "DATE", "TOTAL"
                );
                println!("{}", "-".repeat(60));
                for created in returns {
                    println!(
                        "{:<6} {:<6} {:<20} {:<12} {:>12}",
                        created.return_id,
                        created.bill.sale_id,
                        created.bill.customer.customer_name,
                        created.bill.return_date.format("%Y-%m-%d"),
                        format_rupees(created.bill.total_return_amount),
                    );
                }
            }
        }
    }
    Ok(())
}

async fn run_export_command(store: &LocalStore, cmd: ExportCommands) -> Result<()> {
    let directory = StoreDirectory::load(store).await?;
    let exporter = Exporter::new(&directory);

    match cmd {
        ExportCommands::Products { output } => match output {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path))?;
                let count = exporter.export_products_csv(file)?;
                println!("Exported {} products to {}", count, path);
            }
            None => {
                exporter.export_products_csv(io::stdout())?;
            }
        },

        ExportCommands::Customers { output } => match output {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path))?;
                let count = exporter.export_customers_csv(file)?;
                println!("Exported {} customers to {}", count, path);
            }
            None => {
                exporter.export_customers_csv(io::stdout())?;
            }
        },
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn parse_price(input: Option<String>) -> Result<Option<i64>> {
    input
        .map(|s| parse_paise(&s).with_context(|| format!("Invalid price '{}'. Use '50.00' or '50'", s)))
        .transpose()
}

fn parse_sale_type(input: &str) -> Result<SaleType> {
    SaleType::from_str(input)
        .ok_or_else(|| anyhow::anyhow!("Invalid type '{}'. Valid types: retail, wholesale", input))
}

fn parse_payment_mode(input: &str) -> Result<PaymentMode> {
    PaymentMode::from_str(input)
        .ok_or_else(|| anyhow::anyhow!("Invalid mode '{}'. Valid modes: cash, online", input))
}

/// Parse a return item spec of the form "PRODUCT_ID:QTY:PRICE".
fn parse_item(spec: &str) -> Result<DraftEntry> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        anyhow::bail!("Invalid item '{}'. Use PRODUCT_ID:QTY:PRICE", spec);
    }
    let product_id: i64 = parts[0]
        .parse()
        .with_context(|| format!("Invalid product id '{}'", parts[0]))?;
    let quantity: f64 = parts[1]
        .parse()
        .with_context(|| format!("Invalid quantity '{}'", parts[1]))?;
    let price = parse_paise(parts[2])
        .with_context(|| format!("Invalid price '{}'", parts[2]))?;
    Ok(DraftEntry::new(product_id, quantity, price))
}

/// Parse a new-customer spec of the form "name,mobile,address".
fn parse_new_customer(spec: &str) -> Result<NewCustomer> {
    let parts: Vec<&str> = spec.splitn(3, ',').collect();
    if parts.len() != 3 {
        anyhow::bail!("Invalid customer '{}'. Use \"name,mobile,address\"", spec);
    }
    Ok(NewCustomer::new(
        parts[0].trim(),
        parts[1].trim(),
        parts[2].trim(),
    ))
}

fn parse_date(date_str: &str) -> Result<chrono::DateTime<Utc>> {
    use chrono::NaiveDate;

    let naive_date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .context("Date must be in YYYY-MM-DD format")?;

    let naive_datetime = naive_date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid date"))?;

    Ok(naive_datetime.and_utc())
}
