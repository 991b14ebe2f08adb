//! Presentation surface the session writes to.

use medicine_core::{MedicineTable, Modal, Notice};

/// Everything the page displays. Each call replaces what was shown
/// before for that element.
pub trait Ui {
    fn show_medicines(&mut self, table: &MedicineTable);
    fn show_average_price(&mut self, text: &str);
    /// Blocking notification.
    fn alert(&mut self, notice: &Notice);
    fn show_modal(&mut self, modal: &Modal);
}

/// Plain text on stdout, alerts on stderr.
#[derive(Debug, Default)]
pub struct TerminalUi;

impl Ui for TerminalUi {
    fn show_medicines(&mut self, table: &MedicineTable) {
        if table.is_empty() {
            println!("(no medicines)");
        } else {
            print!("{table}");
        }
    }

    fn show_average_price(&mut self, text: &str) {
        println!("Average price: {text}");
    }

    fn alert(&mut self, notice: &Notice) {
        eprintln!("{notice}");
    }

    fn show_modal(&mut self, modal: &Modal) {
        match modal {
            Modal::Closed => {}
            Modal::Create(inputs) => println!("[create] name={:?} price={:?}", inputs.name, inputs.price),
            Modal::Update(inputs) => println!("[update] name={:?} price={:?}", inputs.name, inputs.price),
            Modal::ConfirmDelete(pending) => {
                println!("[delete] remove {:?}? (confirm / cancel)", pending.name)
            }
        }
    }
}
