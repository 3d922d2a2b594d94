use clap::Parser;
use miette::{IntoDiagnostic, Result};
use ordercart::application::service::OrderService;
use ordercart::domain::order::{OrderId, OrderStatus};
use ordercart::domain::ports::{OrderStoreBox, ProductStoreBox};
use ordercart::domain::product::ProductId;
use ordercart::error::OrderError;
use ordercart::infrastructure::in_memory::{InMemoryOrderStore, InMemoryProductStore};
use ordercart::interfaces::csv::action_reader::{ActionReader, ActionType, OrderAction};
use ordercart::interfaces::csv::order_writer::OrderWriter;
use ordercart::interfaces::csv::product_reader::ProductReader;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product catalog CSV file (product, price, stock)
    products: PathBuf,

    /// Order actions CSV file (action, order, customer, email, product, quantity, coupon)
    actions: PathBuf,
}

fn required<T>(value: Option<T>, what: &str) -> Result<T, OrderError> {
    value.ok_or_else(|| OrderError::InvalidArgument(format!("{what} column is required")))
}

/// Applies one action row, resolving the caller-side `order` reference to
/// the store-assigned id.
async fn apply_action(
    service: &OrderService,
    refs: &mut HashMap<u64, OrderId>,
    action: OrderAction,
) -> Result<(), OrderError> {
    let order_ref = action.order;
    let resolve = move |refs: &HashMap<u64, OrderId>| {
        refs.get(&order_ref).copied().ok_or_else(|| {
            OrderError::InvalidArgument(format!("unknown order reference {order_ref}"))
        })
    };

    match action.action {
        ActionType::Create => {
            if refs.contains_key(&order_ref) {
                return Err(OrderError::InvalidArgument(format!(
                    "order reference {order_ref} already created"
                )));
            }
            let customer = required(action.customer, "customer")?;
            let email = required(action.email, "email")?;
            let order_id = service.create_order(&customer, &email).await?;
            refs.insert(order_ref, order_id);
        }
        ActionType::Add => {
            let order_id = resolve(refs)?;
            let product = ProductId::new(required(action.product, "product")?);
            let quantity = required(action.quantity, "quantity")?;
            service.add_product(order_id, &product, quantity).await?;
        }
        ActionType::Remove => {
            let order_id = resolve(refs)?;
            let product = ProductId::new(required(action.product, "product")?);
            service.remove_product(order_id, &product).await?;
        }
        ActionType::Checkout => {
            let order_id = resolve(refs)?;
            service.checkout(order_id, action.coupon.as_deref()).await?;
        }
        ActionType::Processing => {
            service
                .set_status(resolve(refs)?, OrderStatus::Processing)
                .await?;
        }
        ActionType::Shipped => {
            service
                .set_status(resolve(refs)?, OrderStatus::Shipped)
                .await?;
        }
        ActionType::Delivered => {
            service
                .set_status(resolve(refs)?, OrderStatus::Delivered)
                .await?;
        }
        ActionType::Cancelled => {
            service
                .set_status(resolve(refs)?, OrderStatus::Cancelled)
                .await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let order_store: OrderStoreBox = Box::new(InMemoryOrderStore::new());
    let product_store: ProductStoreBox = Box::new(InMemoryProductStore::new());

    // Seed the catalog before any action runs.
    let catalog = File::open(cli.products).into_diagnostic()?;
    for product_result in ProductReader::new(catalog).products() {
        let product = product_result.into_diagnostic()?;
        product_store.put(product).await.into_diagnostic()?;
    }

    let service = OrderService::new(order_store, product_store);
    let mut refs: HashMap<u64, OrderId> = HashMap::new();

    let actions = File::open(cli.actions).into_diagnostic()?;
    for action_result in ActionReader::new(actions).actions() {
        match action_result {
            Ok(action) => {
                if let Err(e) = apply_action(&service, &mut refs, action).await {
                    eprintln!("Error applying action: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading action: {}", e);
            }
        }
    }

    // Collect final state from the service
    let orders = service.into_results().await.into_diagnostic()?;

    // Output final state
    let stdout = io::stdout();
    let mut writer = OrderWriter::new(stdout.lock());
    writer.write_orders(orders).into_diagnostic()?;

    Ok(())
}
