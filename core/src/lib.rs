//! Client core for the medicine inventory service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), renders the inventory into a
//! plain `View`, and drives the create/update/delete forms.
//!
//! # Design
//! - `InventoryClient` is stateless; it holds only `base_url`.
//! - Each remote operation is split into `build_*` and `parse_*`.
//! - `AppState` is the only client state and is thrown away on every
//!   reload; `render` is a pure function of it.
//! - `FormController` returns requests and `Effect`s instead of performing
//!   them, so the host decides how to execute, notify and reload.

pub mod bootstrap;
pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod render;
pub mod types;

pub use bootstrap::{Bootstrap, BootstrapRequests};
pub use client::InventoryClient;
pub use controller::{Effect, FormController, FormInputs, Modal, PendingDelete, PendingRequest, Submission};
pub use error::{Notice, RemoteError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::{render, AppState, DeleteAction, MedicineRow, MedicineTable, UpdateAction, View};
pub use types::{AveragePrice, Medicine, MedicineInput, Operation};
