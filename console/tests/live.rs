//! Session over the real ureq transport against the mock server.

use medicine_console::{FlowOutcome, Session, Ui, UreqTransport};
use medicine_core::{InventoryClient, MedicineTable, Modal, Notice};
use mock_server::StoredMedicine;

#[derive(Default)]
struct Alerts(Vec<String>);

impl Ui for Alerts {
    fn show_medicines(&mut self, _table: &MedicineTable) {}

    fn show_average_price(&mut self, _text: &str) {}

    fn alert(&mut self, notice: &Notice) {
        self.0.push(notice.text().to_string());
    }

    fn show_modal(&mut self, _modal: &Modal) {}
}

async fn start_server(seed: Vec<StoredMedicine>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_with(listener, seed));
    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn edit_and_delete_over_http() {
    let base = start_server(vec![
        StoredMedicine::new("Paracetamol", Some(3.0)),
        StoredMedicine::new("Ibuprofen", Some(4.0)),
    ])
    .await;
    let mut session = Session::new(InventoryClient::new(&base), UreqTransport::new(), Alerts::default());

    let view = session.reload().await;
    assert_eq!(view.table.len(), 2);
    assert_eq!(view.average_price.as_deref(), Some("£3.50"));

    session.open_update("Paracetamol").unwrap();
    session.set_price("2.5").unwrap();
    assert_eq!(session.submit().await, FlowOutcome::Reloaded);
    assert_eq!(session.view().table.row("Paracetamol").unwrap().price, "£2.50");

    session.open_delete("Ibuprofen").unwrap();
    assert_eq!(session.confirm_delete().await, FlowOutcome::Reloaded);
    assert!(session.view().table.row("Ibuprofen").is_none());
    assert_eq!(session.view().average_price.as_deref(), Some("£2.50"));
    assert!(session.ui().0.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreachable_backend_alerts_for_each_read() {
    // bind then drop to get a port nobody listens on
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let mut session = Session::new(
        InventoryClient::new(&format!("http://{addr}")),
        UreqTransport::new(),
        Alerts::default(),
    );

    let view = session.reload().await.clone();
    assert!(view.table.is_empty());
    let mut alerts = session.ui().0.clone();
    alerts.sort();
    assert_eq!(
        alerts,
        ["Error: Failed to load average price.", "Error: Failed to load medicines."]
    );
}
