//! Domain DTOs for the inventory API.
//!
//! # Design
//! The server owns every persisted value. `Medicine::price` is kept as the
//! display string the server formatted (currency symbol included) and is
//! never reinterpreted; only `MedicineInput` carries a numeric price, because
//! that is what the mutation endpoints accept.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency symbol the server prefixes to formatted prices.
pub const CURRENCY_SYMBOL: char = '£';

/// A single medicine as listed by the server. `name` is the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Medicine {
    pub name: String,
    pub price: String,
}

impl Medicine {
    /// The price with its currency symbol removed, ready for a numeric input.
    ///
    /// Text without a symbol (e.g. "Price Not Available") comes back as is.
    pub fn editable_price(&self) -> String {
        self.price.replacen(CURRENCY_SYMBOL, "", 1)
    }
}

/// Form payload for create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicineInput {
    pub name: String,
    pub price: f64,
}

impl MedicineInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Form fields in wire order. `f64`'s `Display` is the shortest string
    /// that parses back to the same value, so nothing is rounded.
    pub fn form_fields(&self) -> [(&'static str, String); 2] {
        [("name", self.name.clone()), ("price", self.price.to_string())]
    }
}

/// Server-computed average over all priced medicines.
///
/// The backend sends either a preformatted string ("£7.25", or a sentence
/// when nothing is priced) or a bare number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AveragePrice {
    Amount(f64),
    Text(String),
}

impl fmt::Display for AveragePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AveragePrice::Amount(value) => write!(f, "{value}"),
            AveragePrice::Text(text) => f.write_str(text),
        }
    }
}

/// `GET /medicines` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineList {
    pub medicines: Vec<Medicine>,
}

/// `GET /average_price` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AveragePriceBody {
    pub average_price: AveragePrice,
}

/// The remote operations, used to pick fallback error text and to route
/// responses back to the flow that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListMedicines,
    AveragePrice,
    CreateMedicine,
    UpdateMedicine,
    DeleteMedicine,
}

impl Operation {
    /// Message shown when the server gives no usable error text.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::ListMedicines => "Failed to load medicines.",
            Operation::AveragePrice => "Failed to load average price.",
            Operation::CreateMedicine => "Failed to create medicine.",
            Operation::UpdateMedicine => "Failed to update medicine.",
            Operation::DeleteMedicine => "Failed to delete medicine.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListMedicines => "list",
            Operation::AveragePrice => "average",
            Operation::CreateMedicine => "create",
            Operation::UpdateMedicine => "update",
            Operation::DeleteMedicine => "delete",
        };
        f.write_str(name)
    }
}
