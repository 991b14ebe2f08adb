//! Initial load: fetch the medicine list and the average price.
//!
//! The two reads are independent. The host issues both at once and feeds
//! each response back through its own `apply_*`, in whatever order they
//! complete; one failing leaves the other half of the state untouched.

use crate::client::InventoryClient;
use crate::error::{Notice, RemoteError};
use crate::http::{HttpRequest, HttpResponse};
use crate::render::AppState;

/// The two read requests of a (re)load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapRequests {
    pub medicines: HttpRequest,
    pub average_price: HttpRequest,
}

#[derive(Debug, Clone, Copy)]
pub struct Bootstrap<'a> {
    client: &'a InventoryClient,
}

impl<'a> Bootstrap<'a> {
    pub fn new(client: &'a InventoryClient) -> Self {
        Self { client }
    }

    pub fn requests(&self) -> BootstrapRequests {
        BootstrapRequests {
            medicines: self.client.build_list_medicines(),
            average_price: self.client.build_average_price(),
        }
    }

    /// Replace the medicine list, or report why it could not be loaded.
    pub fn apply_medicines(
        &self,
        state: &mut AppState,
        outcome: Result<HttpResponse, RemoteError>,
    ) -> Option<Notice> {
        match outcome.and_then(|response| self.client.parse_list_medicines(response)) {
            Ok(medicines) => {
                state.medicines = medicines;
                None
            }
            Err(err) => Some(err.into()),
        }
    }

    pub fn apply_average_price(
        &self,
        state: &mut AppState,
        outcome: Result<HttpResponse, RemoteError>,
    ) -> Option<Notice> {
        match outcome.and_then(|response| self.client.parse_average_price(response)) {
            Ok(average) => {
                state.average_price = Some(average);
                None
            }
            Err(err) => Some(err.into()),
        }
    }
}
