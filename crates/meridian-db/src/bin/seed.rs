//! # Seed Data Generator
//!
//! Populates the database with test customers and orders for development.
//!
//! ## Usage
//! ```bash
//! # Generate 25 customers (default), each with a few orders
//! cargo run -p meridian-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p meridian-db --bin seed -- --count 100
//!
//! # Specify database path
//! cargo run -p meridian-db --bin seed -- --db ./data/meridian.db
//! ```
//!
//! ## Generated Data
//! - Customers with unique emails (`seed.N@example.com`)
//! - 0-3 orders per customer across the status vocabulary
//! - Line items with varied quantities, prices, and discounts, priced
//!   through the same engine the services use

use chrono::Utc;
use std::env;
use tracing::info;

use meridian_core::types::status;
use meridian_core::{Customer, CustomerFields, Order, OrderItem};
use meridian_db::{generate_customer_id, generate_order_id, Database, DbConfig};

/// Item name pool for realistic-looking orders.
const ITEM_NAMES: &[&str] = &[
    "Aluminum Bracket",
    "Brass Fitting",
    "Cable Tie Pack",
    "Drywall Screws",
    "Epoxy Resin Kit",
    "Flex Conduit",
    "Gasket Set",
    "Hex Bolt Assortment",
    "Insulation Roll",
    "Junction Box",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bruno", "Carla", "Dmitri", "Elena", "Farid", "Greta", "Hiro", "Ines", "Jonas",
];

const LAST_NAMES: &[&str] = &[
    "Alvarez", "Becker", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Haruki", "Iversen",
    "Jansen",
];

const STATUSES: &[&str] = &[status::PENDING, status::PAID, status::SHIPPED, status::CANCELLED];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (count, db_path) = parse_args();

    info!(count, db_path = %db_path, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let mut orders_created = 0usize;

    for i in 0..count {
        let customer = make_customer(i);
        db.customers().insert(&customer).await?;

        // 0-3 orders per customer, varied deterministically by index.
        for j in 0..(i % 4) {
            let order = make_order(&customer, i, j);
            db.orders().insert(&order).await?;
            orders_created += 1;
        }
    }

    info!(customers = count, orders = orders_created, "Seeding complete");
    db.close().await;
    Ok(())
}

/// Parses `--count N` and `--db PATH` from the command line.
fn parse_args() -> (usize, String) {
    let args: Vec<String> = env::args().collect();
    let mut count = 25usize;
    let mut db_path = "./meridian.db".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" => {
                if let Some(value) = args.get(i + 1) {
                    count = value.parse().unwrap_or(count);
                    i += 1;
                }
            }
            "--db" => {
                if let Some(value) = args.get(i + 1) {
                    db_path = value.clone();
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    (count, db_path)
}

fn make_customer(i: usize) -> Customer {
    let first = FIRST_NAMES[i % FIRST_NAMES.len()];
    let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];

    Customer::from_fields(
        generate_customer_id(),
        CustomerFields {
            name: format!("{first} {last}"),
            email: format!("seed.{i}@example.com"),
            phone: (i % 3 == 0).then(|| format!("555-{:04}", i)),
            address: (i % 2 == 0).then(|| format!("{} Main Street", 100 + i)),
            note: None,
        },
        Utc::now(),
    )
}

fn make_order(customer: &Customer, i: usize, j: usize) -> Order {
    let item_count = 1 + (i + j) % 3;
    let items: Vec<OrderItem> = (0..item_count)
        .map(|k| {
            let idx = (i + j + k) % ITEM_NAMES.len();
            OrderItem {
                name: ITEM_NAMES[idx].to_string(),
                quantity: 1 + ((i + k) % 5) as i64,
                unit_price: 0.99 + idx as f64 * 2.50,
                discount_percent: [0.0, 5.0, 10.0][(j + k) % 3],
            }
        })
        .collect();

    let order_discount = [0.0, 0.0, 2.5, 5.0][(i + j) % 4];
    let order_status = STATUSES[(i + j) % STATUSES.len()];

    // Order::create prices the order through the same engine the services
    // use, so seeded rows satisfy the derived-field invariant.
    Order::create(
        generate_order_id(),
        customer.id.clone(),
        Some(order_status.to_string()),
        order_discount,
        items,
        Utc::now(),
    )
}
