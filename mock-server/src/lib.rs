use std::{fs, io, path::Path, sync::Arc};

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    routing::{delete, get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// A medicine as kept in the store. `price` is absent for unpriced entries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredMedicine {
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
}

impl StoredMedicine {
    pub fn new(name: &str, price: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            price,
        }
    }
}

/// A medicine as listed, with its price formatted for display.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Medicine {
    pub name: String,
    pub price: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MedicineList {
    pub medicines: Vec<Medicine>,
}

#[derive(Deserialize)]
pub struct MedicineForm {
    pub name: String,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct NameForm {
    pub name: String,
}

#[derive(Deserialize)]
struct SeedFile {
    medicines: Vec<StoredMedicine>,
}

pub type Db = Arc<RwLock<Vec<StoredMedicine>>>;

type Reply = (StatusCode, Json<Value>);

pub const NO_PRICES: &str = "No valid prices available";
pub const PRICE_NOT_AVAILABLE: &str = "Price Not Available";

pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(seed: Vec<StoredMedicine>) -> Router {
    let db: Db = Arc::new(RwLock::new(seed));
    Router::new()
        .route("/medicines", get(list_medicines))
        .route("/average_price", get(average_price))
        .route("/create", post(create_medicine))
        .route("/update", post(update_medicine))
        .route("/delete", delete(delete_medicine))
        .with_state(db)
}

pub async fn run_with(listener: TcpListener, seed: Vec<StoredMedicine>) -> Result<(), io::Error> {
    axum::serve(listener, app_with(seed)).await
}

/// Read a `{"medicines": [{"name": ..., "price": ...}]}` file.
pub fn load_seed(path: &Path) -> Result<Vec<StoredMedicine>, io::Error> {
    let raw = fs::read_to_string(path)?;
    let file: SeedFile =
        serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(file.medicines)
}

pub fn format_price(price: f64) -> String {
    format!("£{price:.2}")
}

async fn list_medicines(State(db): State<Db>) -> Json<MedicineList> {
    let medicines = db.read().await;
    let medicines = medicines
        .iter()
        .filter(|med| !med.name.is_empty())
        .map(|med| Medicine {
            name: med.name.clone(),
            price: med
                .price
                .map(format_price)
                .unwrap_or_else(|| PRICE_NOT_AVAILABLE.to_string()),
        })
        .collect();
    Json(MedicineList { medicines })
}

async fn average_price(State(db): State<Db>) -> Json<Value> {
    let medicines = db.read().await;
    let prices: Vec<f64> = medicines.iter().filter_map(|med| med.price).collect();
    if prices.is_empty() {
        return Json(json!({ "average_price": NO_PRICES }));
    }
    let average = prices.iter().sum::<f64>() / prices.len() as f64;
    Json(json!({ "average_price": format_price(average) }))
}

async fn create_medicine(
    State(db): State<Db>,
    form: Result<Form<MedicineForm>, FormRejection>,
) -> Reply {
    let input = match accept(form) {
        Ok(input) => input,
        Err(reply) => return reply,
    };
    let mut medicines = db.write().await;
    if medicines.iter().any(|med| med.name == input.name) {
        return (StatusCode::CONFLICT, Json(json!({ "detail": "duplicate name" })));
    }
    medicines.push(StoredMedicine {
        name: input.name.clone(),
        price: Some(input.price),
    });
    tracing::info!(name = %input.name, price = input.price, "medicine created");
    ok(format!("Medicine created successfully with name: {}", input.name))
}

async fn update_medicine(
    State(db): State<Db>,
    form: Result<Form<MedicineForm>, FormRejection>,
) -> Reply {
    let input = match accept(form) {
        Ok(input) => input,
        Err(reply) => return reply,
    };
    let mut medicines = db.write().await;
    let Some(med) = medicines.iter_mut().find(|med| med.name == input.name) else {
        return reported_error("404", "Medicine not found");
    };
    med.price = Some(input.price);
    tracing::info!(name = %input.name, price = input.price, "medicine updated");
    ok(format!("Medicine updated successfully with name: {}", input.name))
}

async fn delete_medicine(State(db): State<Db>, form: Result<Form<NameForm>, FormRejection>) -> Reply {
    let name = match form {
        Ok(Form(form)) => form.name,
        Err(rejection) => return unprocessable(&rejection.body_text()),
    };
    let mut medicines = db.write().await;
    let Some(index) = medicines.iter().position(|med| med.name == name) else {
        return reported_error("404", "Medicine not found");
    };
    medicines.remove(index);
    tracing::info!(name = %name, "medicine deleted");
    ok(format!("Medicine deleted successfully with name: {name}"))
}

/// Unwrap a create/update form, answering the way the real backend does
/// for bad input.
fn accept(form: Result<Form<MedicineForm>, FormRejection>) -> Result<MedicineForm, Reply> {
    let Form(input) = form.map_err(|rejection| unprocessable(&rejection.body_text()))?;
    if !input.price.is_finite() {
        return Err(unprocessable("Input should be a finite number"));
    }
    if input.name.is_empty() {
        return Err(reported_error("400", "Provide valid entries for Name and Price"));
    }
    Ok(input)
}

fn ok(message: String) -> Reply {
    (StatusCode::OK, Json(json!({ "message": message })))
}

/// The backend reports some failures inside a 200 body.
fn reported_error(code: &str, message: &str) -> Reply {
    (
        StatusCode::OK,
        Json(json!({ "status": "error", "code": code, "message": message })),
    )
}

fn unprocessable(msg: &str) -> Reply {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": [{ "loc": ["body"], "msg": msg, "type": "value_error" }] })),
    )
}
