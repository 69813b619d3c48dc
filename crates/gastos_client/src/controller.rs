//! Command handlers: translate user intents into gateway calls and state
//! transitions.
//!
//! Every network command holds the loading flag from start to finish,
//! including the list+total reload that follows a successful mutation.
//! Intents that arrive while the flag is set are ignored.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::domain::{Expense, ExpenseId, ExpensePayload};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    error::{CommandError, Operation},
    gateway::ExpenseGateway,
    store::{FormDraft, ViewState},
};

pub const DELETE_PROMPT: &str = "Tem certeza que deseja excluir este gasto?";

const EVENT_CAPACITY: usize = 64;

/// Yes/no gate consulted before a delete is issued.
pub trait ConfirmationGate {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> ConfirmationGate for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command ran and every request it issued succeeded.
    Applied,
    /// Local validation failed; nothing was sent.
    Rejected,
    /// A request failed; the error slot holds the message.
    Failed,
    /// The delete confirmation was declined.
    Declined,
    /// Another command was still in flight, or the target was unknown.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    LoadingStarted,
    LoadingFinished,
    Reloaded { count: usize, total: Decimal },
    Failed(String),
}

pub struct ExpenseController {
    gateway: Arc<dyn ExpenseGateway>,
    state: ViewState,
    events: broadcast::Sender<ControllerEvent>,
}

impl ExpenseController {
    pub fn new(gateway: Arc<dyn ExpenseGateway>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            gateway,
            state: ViewState::default(),
            events,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Mutable access to the form, unavailable while a command is in flight.
    pub fn draft_mut(&mut self) -> Option<&mut FormDraft> {
        if self.state.loading {
            None
        } else {
            Some(&mut self.state.draft)
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    /// Fetches list and total together and applies both, or neither.
    pub async fn load(&mut self) -> CommandOutcome {
        if self.state.loading {
            return CommandOutcome::Ignored;
        }
        self.state.error = None;
        self.enter_loading();
        let outcome = self.reload_or_record().await;
        self.leave_loading();
        outcome
    }

    pub async fn submit(&mut self) -> CommandOutcome {
        if self.state.loading {
            return CommandOutcome::Ignored;
        }
        self.state.error = None;

        let payload = match self.state.draft.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.record_failure(err.into());
                return CommandOutcome::Rejected;
            }
        };

        self.enter_loading();
        let outcome = match self.persist(&payload).await {
            Ok(saved) => {
                info!(id = %saved.id, editing = self.state.is_editing(), "expense saved");
                self.state.reset_draft();
                self.reload_or_record().await
            }
            Err(err) => {
                self.record_failure(err);
                CommandOutcome::Failed
            }
        };
        self.leave_loading();
        outcome
    }

    /// Loads a listed record into the form and marks it as the edit target.
    pub fn begin_edit(&mut self, id: ExpenseId) -> CommandOutcome {
        if self.state.loading {
            return CommandOutcome::Ignored;
        }
        let Some(expense) = self.state.find(id) else {
            return CommandOutcome::Ignored;
        };
        self.state.draft = FormDraft::from_expense(expense);
        self.state.edit_target = Some(id);
        CommandOutcome::Applied
    }

    pub fn cancel_edit(&mut self) -> CommandOutcome {
        if self.state.loading {
            return CommandOutcome::Ignored;
        }
        self.state.reset_draft();
        CommandOutcome::Applied
    }

    pub async fn delete<C>(&mut self, id: ExpenseId, gate: &mut C) -> CommandOutcome
    where
        C: ConfirmationGate + ?Sized,
    {
        if self.state.loading {
            return CommandOutcome::Ignored;
        }
        if !gate.confirm(DELETE_PROMPT) {
            return CommandOutcome::Declined;
        }
        self.state.error = None;

        self.enter_loading();
        let outcome = match self.gateway.remove(id).await {
            Ok(()) => {
                info!(%id, "expense deleted");
                self.reload_or_record().await
            }
            Err(source) => {
                self.record_failure(CommandError::gateway(Operation::Delete, source));
                CommandOutcome::Failed
            }
        };
        self.leave_loading();
        outcome
    }

    async fn persist(&self, payload: &ExpensePayload) -> Result<Expense, CommandError> {
        let result = match self.state.edit_target {
            Some(id) => self.gateway.update(id, payload).await,
            None => self.gateway.create(payload).await,
        };
        result.map_err(|source| CommandError::gateway(Operation::Save, source))
    }

    async fn reload_or_record(&mut self) -> CommandOutcome {
        match self.reload_pair().await {
            Ok(()) => CommandOutcome::Applied,
            Err(err) => {
                self.record_failure(err);
                CommandOutcome::Failed
            }
        }
    }

    async fn reload_pair(&mut self) -> Result<(), CommandError> {
        // Both requests always run to completion before either result is looked at.
        let gateway = Arc::clone(&self.gateway);
        let (expenses, total) = futures::join!(gateway.list_all(), gateway.fetch_total());

        match (expenses, total) {
            (Ok(expenses), Ok(total)) => {
                info!(count = expenses.len(), %total, "expense listing reloaded");
                let _ = self.events.send(ControllerEvent::Reloaded {
                    count: expenses.len(),
                    total,
                });
                self.state.expenses = expenses;
                self.state.total = total;
                self.state.error = None;
                Ok(())
            }
            (Err(source), _) | (_, Err(source)) => {
                Err(CommandError::gateway(Operation::Load, source))
            }
        }
    }

    fn record_failure(&mut self, err: CommandError) {
        let message = err.user_message();
        warn!(error = %err, %message, "expense command failed");
        let _ = self.events.send(ControllerEvent::Failed(message.clone()));
        self.state.error = Some(message);
    }

    fn enter_loading(&mut self) {
        self.state.loading = true;
        let _ = self.events.send(ControllerEvent::LoadingStarted);
    }

    fn leave_loading(&mut self) {
        self.state.loading = false;
        let _ = self.events.send(ControllerEvent::LoadingFinished);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
