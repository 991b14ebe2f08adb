//! One page session: bootstrap, form flows, and reload after each
//! successful mutation.
//!
//! # Design
//! The session owns the only mutable client state (`AppState` and the form
//! controller) and runs on a single-threaded runtime. Requests run on the
//! blocking pool; the two bootstrap reads are in flight together and each
//! is displayed as soon as it lands. A reload starts from an empty
//! `AppState`.

use std::{pin::pin, sync::Arc};

use medicine_core::{
    render, AppState, Bootstrap, DeleteAction, Effect, FormController, HttpRequest, HttpResponse, InventoryClient,
    Notice, Operation, RemoteError, Submission, UpdateAction, View,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::transport::{Transport, TransportError};
use crate::ui::Ui;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no medicine named '{0}' is listed")]
    UnknownMedicine(String),
    #[error("no form is open")]
    NoFormOpen,
}

/// How a submit or confirm ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The mutation succeeded and the page was reloaded.
    Reloaded,
    /// The server or transport reported a failure; the modal is still open.
    Failed(Notice),
    /// Local validation stopped the submission.
    Rejected(Notice),
    /// Nothing was open to submit.
    Idle,
}

impl FlowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FlowOutcome::Reloaded)
    }
}

pub struct Session<T, U> {
    client: InventoryClient,
    transport: Arc<T>,
    ui: U,
    controller: FormController,
    state: AppState,
    view: View,
}

impl<T: Transport, U: Ui> Session<T, U> {
    pub fn new(client: InventoryClient, transport: T, ui: U) -> Self {
        Self {
            client,
            transport: Arc::new(transport),
            ui,
            controller: FormController::new(),
            state: AppState::default(),
            view: View::default(),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Throw away all client state and fetch both reads again.
    pub async fn reload(&mut self) -> &View {
        info!(base_url = %self.client.base_url(), "loading inventory");
        let bootstrap = Bootstrap::new(&self.client);
        let requests = bootstrap.requests();
        let mut state = AppState::default();

        let mut medicines = pin!(fetch(
            Arc::clone(&self.transport),
            Operation::ListMedicines,
            requests.medicines
        ));
        let mut average = pin!(fetch(
            Arc::clone(&self.transport),
            Operation::AveragePrice,
            requests.average_price
        ));
        let (mut medicines_done, mut average_done) = (false, false);

        while !(medicines_done && average_done) {
            tokio::select! {
                outcome = &mut medicines, if !medicines_done => {
                    medicines_done = true;
                    match bootstrap.apply_medicines(&mut state, outcome) {
                        Some(notice) => self.ui.alert(&notice),
                        None => self.ui.show_medicines(&render(&state).table),
                    }
                }
                outcome = &mut average, if !average_done => {
                    average_done = true;
                    match bootstrap.apply_average_price(&mut state, outcome) {
                        Some(notice) => self.ui.alert(&notice),
                        None => {
                            if let Some(text) = render(&state).average_price {
                                self.ui.show_average_price(&text);
                            }
                        }
                    }
                }
            }
        }

        self.view = render(&state);
        self.state = state;
        &self.view
    }

    pub fn open_create(&mut self) {
        self.controller.open_create();
        self.ui.show_modal(self.controller.modal());
    }

    /// Open the update form prefilled from the listed row.
    pub fn open_update(&mut self, name: &str) -> Result<(), SessionError> {
        let action = self
            .view
            .table
            .row(name)
            .map(|row| row.update.clone())
            .ok_or_else(|| SessionError::UnknownMedicine(name.to_string()))?;
        self.open_update_with(&action);
        Ok(())
    }

    /// Open the update form with explicit values, listed or not.
    pub fn open_update_with(&mut self, action: &UpdateAction) {
        self.controller.open_update(action);
        self.ui.show_modal(self.controller.modal());
    }

    pub fn open_delete(&mut self, name: &str) -> Result<(), SessionError> {
        let action = self
            .view
            .table
            .row(name)
            .map(|row| row.delete.clone())
            .ok_or_else(|| SessionError::UnknownMedicine(name.to_string()))?;
        self.open_delete_with(&action);
        Ok(())
    }

    pub fn open_delete_with(&mut self, action: &DeleteAction) {
        self.controller.open_delete(action);
        self.ui.show_modal(self.controller.modal());
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), SessionError> {
        let inputs = self.controller.inputs_mut().ok_or(SessionError::NoFormOpen)?;
        inputs.name = name.to_string();
        Ok(())
    }

    pub fn set_price(&mut self, price: &str) -> Result<(), SessionError> {
        let inputs = self.controller.inputs_mut().ok_or(SessionError::NoFormOpen)?;
        inputs.price = price.to_string();
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.controller.cancel();
        self.ui.show_modal(self.controller.modal());
    }

    pub async fn submit(&mut self) -> FlowOutcome {
        let submission = self.controller.submit(&self.client);
        self.dispatch(submission).await
    }

    pub async fn confirm_delete(&mut self) -> FlowOutcome {
        let submission = self.controller.confirm_delete(&self.client);
        self.dispatch(submission).await
    }

    async fn dispatch(&mut self, submission: Submission) -> FlowOutcome {
        let pending = match submission {
            Submission::Send(pending) => pending,
            Submission::Rejected(notice) => {
                self.ui.alert(&notice);
                return FlowOutcome::Rejected(notice);
            }
            Submission::Idle => return FlowOutcome::Idle,
        };

        let operation = pending.operation;
        let effect = match fetch(Arc::clone(&self.transport), operation, pending.request).await {
            Ok(response) => self.controller.complete(&self.client, operation, response),
            Err(err) => self.controller.fail(err),
        };

        match effect {
            Effect::Reload => {
                self.ui.show_modal(self.controller.modal());
                self.reload().await;
                FlowOutcome::Reloaded
            }
            Effect::Alert(notice) => {
                warn!(%operation, notice = %notice, "mutation failed");
                self.ui.alert(&notice);
                FlowOutcome::Failed(notice)
            }
        }
    }
}

/// Run one request on the blocking pool. A request that never produced a
/// response becomes the operation's fallback error.
async fn fetch<T: Transport>(
    transport: Arc<T>,
    operation: Operation,
    request: HttpRequest,
) -> Result<HttpResponse, RemoteError> {
    debug!(%operation, method = %request.method, path = %request.path, "sending request");
    let outcome = tokio::task::spawn_blocking(move || transport.execute(request))
        .await
        .unwrap_or_else(|err| Err(TransportError::Task(err.to_string())));

    match outcome {
        Ok(response) => {
            debug!(%operation, status = response.status, "response received");
            Ok(response)
        }
        Err(err) => {
            warn!(%operation, error = %err, "request failed");
            Err(RemoteError::unreachable(operation))
        }
    }
}
