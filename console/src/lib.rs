//! Terminal host for the medicine inventory client.
//!
//! # Overview
//! Executes the requests `medicine-core` builds, over blocking HTTP on a
//! single-threaded tokio runtime, and plays the page: it shows the table and
//! the average price, raises alerts, and reloads after every successful
//! mutation.

pub mod config;
pub mod session;
pub mod shell;
pub mod transport;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use config::{load_settings, Settings};
pub use session::{FlowOutcome, Session, SessionError};
pub use transport::{Transport, TransportError, UreqTransport};
pub use ui::{TerminalUi, Ui};
