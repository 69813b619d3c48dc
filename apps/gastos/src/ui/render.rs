use gastos_client::ViewState;
use shared::domain::Expense;

use super::format::{format_amount, format_date};

pub const TITLE: &str = "Controle de Gastos";
pub const EMPTY_PLACEHOLDER: &str = "Nenhum gasto registrado";
pub const LOADING_PLACEHOLDER: &str = "Carregando...";
const TABLE_HEADER: &str = "Descrição | Data | Valor | Ações";

pub fn submit_label(state: &ViewState) -> &'static str {
    if state.loading {
        "Processando..."
    } else if state.is_editing() {
        "Atualizar"
    } else {
        "Adicionar"
    }
}

pub fn render_total(state: &ViewState) -> String {
    format!("Total Gastos: R$ {}", format_amount(state.total))
}

pub fn render_row(expense: &Expense) -> String {
    format!(
        "{} | {} | R$ {}",
        expense.description,
        format_date(expense.date),
        format_amount(expense.amount)
    )
}

fn render_form(state: &ViewState, lines: &mut Vec<String>) {
    let draft = &state.draft;
    let date = draft
        .date
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_default();

    lines.push(format!("Descrição: {}", draft.description));
    lines.push(format!("Data: {date}"));
    lines.push(format!("Valor (R$): {}", draft.amount));

    let mut buttons = format!("[{}]", submit_label(state));
    if state.is_editing() {
        buttons.push_str(" [Cancelar]");
    }
    if state.loading {
        buttons.push_str(" (desabilitado)");
    }
    lines.push(buttons);
}

fn render_table(state: &ViewState, lines: &mut Vec<String>) {
    if state.loading && state.expenses.is_empty() {
        lines.push(LOADING_PLACEHOLDER.to_string());
        return;
    }

    lines.push(TABLE_HEADER.to_string());
    if state.expenses.is_empty() {
        lines.push(EMPTY_PLACEHOLDER.to_string());
        return;
    }

    for expense in &state.expenses {
        let actions = if state.loading {
            "(aguarde)".to_string()
        } else {
            format!("editar {id} · excluir {id}", id = expense.id)
        };
        lines.push(format!("#{} {} | {actions}", expense.id, render_row(expense)));
    }
}

/// Full console screen for the current state.
pub fn render_screen(state: &ViewState) -> String {
    let mut lines = vec![format!("== {TITLE} ==")];
    if let Some(error) = &state.error {
        lines.push(format!("[erro] {error}"));
    }
    render_form(state, &mut lines);
    lines.push(String::new());
    lines.push(render_total(state));
    render_table(state, &mut lines);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use gastos_client::FormDraft;
    use rust_decimal::Decimal;
    use shared::domain::ExpenseId;

    use super::*;

    fn coffee() -> Expense {
        Expense {
            id: ExpenseId(1),
            description: "Coffee".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            amount: Decimal::new(450, 2),
        }
    }

    fn state_with(expenses: Vec<Expense>, total: Decimal) -> ViewState {
        ViewState {
            expenses,
            total,
            draft: FormDraft::for_date(NaiveDate::from_ymd_opt(2024, 2, 1).expect("date")),
            ..ViewState::default()
        }
    }

    #[test]
    fn listing_scenario_renders_row_and_total() {
        let state = state_with(vec![coffee()], Decimal::new(45, 1));

        assert_eq!(render_row(&coffee()), "Coffee | 05/01/2024 | R$ 4,50");
        assert_eq!(render_total(&state), "Total Gastos: R$ 4,50");

        let screen = render_screen(&state);
        assert!(screen.contains("#1 Coffee | 05/01/2024 | R$ 4,50 | editar 1 · excluir 1"));
        assert!(!screen.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn empty_listing_shows_placeholder() {
        let screen = render_screen(&state_with(Vec::new(), Decimal::ZERO));
        assert!(screen.contains(EMPTY_PLACEHOLDER));
        assert!(screen.contains("Total Gastos: R$ 0,00"));
    }

    #[test]
    fn submit_label_tracks_mode() {
        let mut state = state_with(vec![coffee()], Decimal::new(45, 1));
        assert_eq!(submit_label(&state), "Adicionar");

        state.edit_target = Some(ExpenseId(1));
        assert_eq!(submit_label(&state), "Atualizar");
        assert!(render_screen(&state).contains("[Atualizar] [Cancelar]"));

        state.loading = true;
        assert_eq!(submit_label(&state), "Processando...");
    }

    #[test]
    fn loading_disables_row_actions() {
        let mut state = state_with(vec![coffee()], Decimal::new(45, 1));
        state.loading = true;

        let screen = render_screen(&state);
        assert!(screen.contains("(aguarde)"));
        assert!(!screen.contains("excluir 1"));
        assert!(screen.contains("(desabilitado)"));
    }

    #[test]
    fn loading_with_empty_listing_shows_loading_placeholder() {
        let mut state = state_with(Vec::new(), Decimal::ZERO);
        state.loading = true;
        assert!(render_screen(&state).contains(LOADING_PLACEHOLDER));
    }

    #[test]
    fn error_banner_appears_only_with_message() {
        let mut state = state_with(Vec::new(), Decimal::ZERO);
        assert!(!render_screen(&state).contains("[erro]"));

        state.error = Some("Erro ao salvar gasto".to_string());
        assert!(render_screen(&state).contains("[erro] Erro ao salvar gasto"));
    }
}
