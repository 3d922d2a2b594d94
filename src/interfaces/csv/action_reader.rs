use crate::error::{OrderError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Create,
    Add,
    Remove,
    Checkout,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// One row of the action stream CSV:
/// `action, order, customer, email, product, quantity, coupon`.
///
/// The `order` column is a caller-side reference number; the store-assigned
/// identifier is resolved by whoever drives the service. Columns that do
/// not apply to an action are left empty.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OrderAction {
    pub action: ActionType,
    pub order: u64,
    pub customer: Option<String>,
    pub email: Option<String>,
    pub product: Option<String>,
    pub quantity: Option<i64>,
    pub coupon: Option<String>,
}

/// Reads order actions from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<OrderAction>`. It handles whitespace trimming and flexible
/// record lengths automatically.
pub struct ActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActionReader<R> {
    /// Creates a new `ActionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes actions.
    ///
    /// This allows for processing large files in a streaming fashion without
    /// loading the entire dataset into memory.
    pub fn actions(self) -> impl Iterator<Item = Result<OrderAction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(OrderError::from))
    }
}
