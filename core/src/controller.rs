//! Form controller for the create, update and delete flows.
//!
//! # Design
//! Each flow is `Closed -> Open -> (submit) -> Closed`. The controller never
//! talks to the network: `submit` and `confirm_delete` hand back the request
//! to execute, and `complete` turns the response into an `Effect` for the
//! host. A successful mutation always ends in `Effect::Reload`; the client
//! keeps no copy of the data to patch.
//!
//! A modal stays open while its request is in flight and after a failure, so
//! the user can retry. Nothing stops a second submit before the first one
//! resolves.

use crate::client::InventoryClient;
use crate::error::{Notice, RemoteError, ValidationError};
use crate::http::{HttpRequest, HttpResponse};
use crate::render::{DeleteAction, UpdateAction};
use crate::types::{MedicineInput, Operation};

/// Input fields of the create and update forms, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub name: String,
    pub price: String,
}

impl FormInputs {
    /// Parse the price field. Only a negative or non-numeric price is
    /// rejected; the name goes to the server untouched.
    pub fn validate(&self) -> Result<MedicineInput, ValidationError> {
        let price: f64 = self.price.trim().parse().map_err(|_| ValidationError::NotANumber)?;
        if !price.is_finite() {
            return Err(ValidationError::NotANumber);
        }
        if price < 0.0 {
            return Err(ValidationError::NegativePrice);
        }
        // "-0" passes the sign check but must go out as 0
        let price = if price == 0.0 { 0.0 } else { price };
        Ok(MedicineInput::new(self.name.clone(), price))
    }
}

/// The medicine a delete confirmation is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Create(FormInputs),
    Update(FormInputs),
    ConfirmDelete(PendingDelete),
}

/// A request the host must execute, tagged with the operation that will
/// interpret its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub operation: Operation,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Send(PendingRequest),
    /// Local validation failed; nothing was sent and the form stays open.
    Rejected(Notice),
    /// No matching modal is open.
    Idle,
}

/// What the host must do once a mutation resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Discard all client state and run bootstrap again.
    Reload,
    Alert(Notice),
}

#[derive(Debug, Clone, Default)]
pub struct FormController {
    modal: Modal,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn is_open(&self) -> bool {
        self.modal != Modal::Closed
    }

    pub fn open_create(&mut self) {
        self.modal = Modal::Create(FormInputs::default());
    }

    pub fn open_update(&mut self, action: &UpdateAction) {
        self.modal = Modal::Update(FormInputs {
            name: action.name.clone(),
            price: action.price.clone(),
        });
    }

    pub fn open_delete(&mut self, action: &DeleteAction) {
        self.modal = Modal::ConfirmDelete(PendingDelete {
            name: action.name.clone(),
        });
    }

    /// Input fields of the open create or update form.
    pub fn inputs_mut(&mut self) -> Option<&mut FormInputs> {
        match &mut self.modal {
            Modal::Create(inputs) | Modal::Update(inputs) => Some(inputs),
            Modal::Closed | Modal::ConfirmDelete(_) => None,
        }
    }

    pub fn cancel(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Submit the open create or update form.
    pub fn submit(&self, client: &InventoryClient) -> Submission {
        type Build = fn(&InventoryClient, &MedicineInput) -> HttpRequest;
        let (operation, inputs, build): (Operation, &FormInputs, Build) = match &self.modal {
            Modal::Create(inputs) => (
                Operation::CreateMedicine,
                inputs,
                InventoryClient::build_create_medicine,
            ),
            Modal::Update(inputs) => (
                Operation::UpdateMedicine,
                inputs,
                InventoryClient::build_update_medicine,
            ),
            Modal::Closed | Modal::ConfirmDelete(_) => return Submission::Idle,
        };
        let input = match inputs.validate() {
            Ok(input) => input,
            Err(err) => return Submission::Rejected(err.into()),
        };
        Submission::Send(PendingRequest {
            operation,
            request: build(client, &input),
        })
    }

    /// Confirm the open delete dialog for its stashed name.
    pub fn confirm_delete(&self, client: &InventoryClient) -> Submission {
        match &self.modal {
            Modal::ConfirmDelete(pending) => Submission::Send(PendingRequest {
                operation: Operation::DeleteMedicine,
                request: client.build_delete_medicine(&pending.name),
            }),
            _ => Submission::Idle,
        }
    }

    /// Interpret the response to a mutation issued by this controller.
    pub fn complete(&mut self, client: &InventoryClient, operation: Operation, response: HttpResponse) -> Effect {
        match client.parse_mutation(operation, response) {
            Ok(()) => {
                self.modal = Modal::Closed;
                Effect::Reload
            }
            Err(err) => self.fail(err),
        }
    }

    /// The request never produced a response. The modal is left as it is.
    pub fn fail(&self, err: RemoteError) -> Effect {
        Effect::Alert(err.into())
    }
}
