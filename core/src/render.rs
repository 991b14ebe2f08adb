//! Pure rendering from `AppState` to a displayable `View`.
//!
//! Nothing here is incremental: every render builds a fresh table from the
//! state it is given, in the order the server listed the medicines.

use std::fmt;

use crate::types::{AveragePrice, Medicine};

/// Everything the client knows between two reloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub medicines: Vec<Medicine>,
    pub average_price: Option<AveragePrice>,
}

/// Opens the update form for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAction {
    pub name: String,
    /// Price with the currency symbol stripped.
    pub price: String,
}

/// Opens the delete confirmation for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAction {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineRow {
    pub name: String,
    pub price: String,
    pub update: UpdateAction,
    pub delete: DeleteAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicineTable {
    pub rows: Vec<MedicineRow>,
}

impl MedicineTable {
    /// First row with this name, as a user would find it on screen.
    pub fn row(&self, name: &str) -> Option<&MedicineRow> {
        self.rows.iter().find(|row| row.name == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for MedicineTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{} | {} | [Update][Delete]", row.name, row.price)?;
        }
        Ok(())
    }
}

/// A rendered page: the table and the average-price text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub table: MedicineTable,
    /// `None` until the average has loaded.
    pub average_price: Option<String>,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)?;
        match &self.average_price {
            Some(average) => writeln!(f, "Average price: {average}"),
            None => writeln!(f, "Average price:"),
        }
    }
}

pub fn render_medicines(medicines: &[Medicine]) -> MedicineTable {
    let rows = medicines
        .iter()
        .map(|medicine| MedicineRow {
            name: medicine.name.clone(),
            price: medicine.price.clone(),
            update: UpdateAction {
                name: medicine.name.clone(),
                price: medicine.editable_price(),
            },
            delete: DeleteAction {
                name: medicine.name.clone(),
            },
        })
        .collect();
    MedicineTable { rows }
}

pub fn render_average_price(value: &AveragePrice) -> String {
    value.to_string()
}

pub fn render(state: &AppState) -> View {
    View {
        table: render_medicines(&state.medicines),
        average_price: state.average_price.as_ref().map(render_average_price),
    }
}
