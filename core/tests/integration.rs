//! Full page lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port with a seeded inventory, then
//! drives bootstrap, rendering and every form flow over real HTTP using
//! ureq. Each successful mutation is followed by a full reload, the same
//! way the page refreshes.

use medicine_core::{
    render, AppState, Bootstrap, DeleteAction, Effect, FormController, HttpMethod, HttpRequest, HttpResponse,
    InventoryClient, Modal, Submission, View,
};
use mock_server::StoredMedicine;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// 4xx/5xx responses come back as data so the core decides what failed.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let content_type = req.header("content-type").unwrap_or("text/plain").to_string();
    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent.post(&req.path).content_type(content_type).send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Delete, Some(body)) => agent
            .delete(&req.path)
            .force_send_body()
            .content_type(content_type)
            .send(body.as_bytes()),
        (HttpMethod::Delete, None) => agent.delete(&req.path).call(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    HttpResponse::new(status, body)
}

fn start_server(seed: Vec<StoredMedicine>) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, seed).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Fresh state, both reads, render. Panics if either read fails.
fn reload(client: &InventoryClient) -> View {
    let bootstrap = Bootstrap::new(client);
    let requests = bootstrap.requests();
    let mut state = AppState::default();
    assert!(bootstrap.apply_medicines(&mut state, Ok(execute(requests.medicines))).is_none());
    assert!(bootstrap.apply_average_price(&mut state, Ok(execute(requests.average_price))).is_none());
    render(&state)
}

/// Submit the open form (or confirmation) and execute whatever it sends.
fn run_submission(controller: &mut FormController, client: &InventoryClient, submission: Submission) -> Effect {
    match submission {
        Submission::Send(pending) => {
            let response = execute(pending.request);
            controller.complete(client, pending.operation, response)
        }
        Submission::Rejected(notice) => panic!("unexpected rejection: {notice}"),
        Submission::Idle => panic!("nothing to submit"),
    }
}

#[test]
fn page_lifecycle() {
    let base = start_server(vec![
        StoredMedicine::new("Paracetamol", Some(3.0)),
        StoredMedicine::new("Ibuprofen", Some(4.0)),
    ]);
    let client = InventoryClient::new(&base);
    let mut controller = FormController::new();

    // Step 1: initial load renders the seeded inventory.
    let view = reload(&client);
    assert_eq!(
        view.table.to_string(),
        "Paracetamol | £3.00 | [Update][Delete]\nIbuprofen | £4.00 | [Update][Delete]\n"
    );
    assert_eq!(view.average_price.as_deref(), Some("£3.50"));

    // Step 2: the update button prefills without the currency symbol.
    let row = view.table.row("Paracetamol").unwrap();
    controller.open_update(&row.update);
    assert!(matches!(controller.modal(), Modal::Update(inputs) if inputs.price == "3.00"));
    controller.cancel();

    // Step 3: create Aspirin at 5, reload, and find it as the server formats it.
    controller.open_create();
    {
        let inputs = controller.inputs_mut().unwrap();
        inputs.name = "Aspirin".to_string();
        inputs.price = "5".to_string();
    }
    let submission = controller.submit(&client);
    assert_eq!(run_submission(&mut controller, &client, submission), Effect::Reload);
    assert!(!controller.is_open());
    let view = reload(&client);
    assert_eq!(view.table.row("Aspirin").unwrap().price, "£5.00");
    assert_eq!(view.table.len(), 3);

    // Step 4: creating it again fails, alerts, and keeps the form open.
    controller.open_create();
    {
        let inputs = controller.inputs_mut().unwrap();
        inputs.name = "Aspirin".to_string();
        inputs.price = "5".to_string();
    }
    let submission = controller.submit(&client);
    match run_submission(&mut controller, &client, submission) {
        Effect::Alert(notice) => assert_eq!(notice.text(), "Error: duplicate name"),
        Effect::Reload => panic!("duplicate create must not reload"),
    }
    assert!(matches!(controller.modal(), Modal::Create(_)));

    // Step 5: a negative price never leaves the client.
    controller.inputs_mut().unwrap().price = "-2".to_string();
    assert!(matches!(controller.submit(&client), Submission::Rejected(_)));
    controller.cancel();
    assert_eq!(reload(&client), view);

    // Step 6: updating twice with the same input ends where updating once does.
    let row = view.table.row("Aspirin").unwrap().clone();
    controller.open_update(&row.update);
    controller.inputs_mut().unwrap().price = "7.25".to_string();
    let submission = controller.submit(&client);
    assert_eq!(run_submission(&mut controller, &client, submission), Effect::Reload);
    let once = reload(&client);

    controller.open_update(&row.update);
    controller.inputs_mut().unwrap().price = "7.25".to_string();
    let submission = controller.submit(&client);
    assert_eq!(run_submission(&mut controller, &client, submission), Effect::Reload);
    let twice = reload(&client);
    assert_eq!(once, twice);
    assert_eq!(twice.table.row("Aspirin").unwrap().price, "£7.25");

    // Step 7: delete Ibuprofen through the confirmation dialog.
    let row = twice.table.row("Ibuprofen").unwrap();
    controller.open_delete(&row.delete);
    let submission = controller.confirm_delete(&client);
    let Submission::Send(pending) = &submission else {
        panic!("expected a delete request");
    };
    assert_eq!(pending.request.method, HttpMethod::Delete);
    assert_eq!(pending.request.body.as_deref(), Some("name=Ibuprofen"));
    assert_eq!(run_submission(&mut controller, &client, submission), Effect::Reload);
    let view = reload(&client);
    assert!(view.table.row("Ibuprofen").is_none());

    // Step 8: deleting it again is reported by the server, dialog stays up.
    controller.open_delete(&DeleteAction {
        name: "Ibuprofen".to_string(),
    });
    let submission = controller.confirm_delete(&client);
    match run_submission(&mut controller, &client, submission) {
        Effect::Alert(notice) => assert_eq!(notice.text(), "Error: Medicine not found"),
        Effect::Reload => panic!("missing medicine must not reload"),
    }
    assert!(matches!(controller.modal(), Modal::ConfirmDelete(_)));
}

#[test]
fn empty_inventory_average_text() {
    let client = InventoryClient::new(&start_server(Vec::new()));
    let view = reload(&client);
    assert!(view.table.is_empty());
    assert_eq!(view.average_price.as_deref(), Some("No valid prices available"));
}
