//! Expense API gateway plus the view-state controller that drives it.

pub mod controller;
pub mod error;
pub mod gateway;
pub mod store;

pub use controller::{
    CommandOutcome, ConfirmationGate, ControllerEvent, ExpenseController, DELETE_PROMPT,
};
pub use error::{
    classify, CommandError, GatewayError, Operation, ValidationError, UNREACHABLE_MESSAGE,
};
pub use gateway::{ExpenseGateway, HttpExpenseGateway};
pub use store::{parse_date_input, FormDraft, ViewState};
