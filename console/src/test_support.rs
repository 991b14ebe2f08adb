//! Scripted transport and recording UI shared by the unit tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use medicine_core::{HttpMethod, HttpRequest, HttpResponse, InventoryClient, MedicineTable, Modal, Notice};

use crate::session::Session;
use crate::transport::{Transport, TransportError};
use crate::ui::Ui;

pub(crate) const PARACETAMOL: &str = r#"{"medicines":[{"name":"Paracetamol","price":"£3.00"}]}"#;

/// Answers by method and path; records every request.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: Mutex<Vec<(HttpMethod, &'static str, VecDeque<Option<HttpResponse>>)>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn on(self, method: HttpMethod, path: &'static str, status: u16, body: &str) -> Self {
        self.push(method, path, Some(HttpResponse::new(status, body)))
    }

    /// Simulates a connection failure.
    pub(crate) fn unreachable(self, method: HttpMethod, path: &'static str) -> Self {
        self.push(method, path, None)
    }

    fn push(self, method: HttpMethod, path: &'static str, response: Option<HttpResponse>) -> Self {
        {
            let mut routes = self.routes.lock().unwrap();
            match routes.iter_mut().find(|(m, p, _)| *m == method && *p == path) {
                Some((_, _, queue)) => queue.push_back(response),
                None => routes.push((method, path, VecDeque::from([response]))),
            }
        }
        self
    }
}

impl Transport for Arc<ScriptedTransport> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        let mut routes = self.routes.lock().unwrap();
        let (_, _, queue) = routes
            .iter_mut()
            .find(|(method, path, _)| *method == request.method && request.path.ends_with(path))
            .unwrap_or_else(|| panic!("unexpected request {} {}", request.method, request.path));
        // the last scripted answer repeats
        let response = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        };
        response.ok_or_else(|| TransportError::Task("connection refused".to_string()))
    }
}

#[derive(Default)]
pub(crate) struct RecordingUi {
    pub(crate) tables: Vec<MedicineTable>,
    pub(crate) averages: Vec<String>,
    pub(crate) alerts: Vec<String>,
    pub(crate) modals: Vec<Modal>,
}

impl Ui for RecordingUi {
    fn show_medicines(&mut self, table: &MedicineTable) {
        self.tables.push(table.clone());
    }

    fn show_average_price(&mut self, text: &str) {
        self.averages.push(text.to_string());
    }

    fn alert(&mut self, notice: &Notice) {
        self.alerts.push(notice.text().to_string());
    }

    fn show_modal(&mut self, modal: &Modal) {
        self.modals.push(modal.clone());
    }
}

pub(crate) type ScriptedSession = Session<Arc<ScriptedTransport>, RecordingUi>;

pub(crate) fn scripted_session(transport: ScriptedTransport) -> (ScriptedSession, Arc<ScriptedTransport>) {
    let transport = Arc::new(transport);
    let session = Session::new(
        InventoryClient::new("http://localhost:8000"),
        Arc::clone(&transport),
        RecordingUi::default(),
    );
    (session, transport)
}

pub(crate) fn sent(transport: &ScriptedTransport) -> Vec<HttpRequest> {
    transport.sent.lock().unwrap().clone()
}
