//! View state owned by the controller: listing snapshot, server total,
//! form draft, edit target, loading flag and error slot.

use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use shared::{
    domain::{Expense, ExpenseId, ExpensePayload},
    timestamp::midnight_utc,
};

use crate::error::ValidationError;

/// Form fields as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    pub description: String,
    pub date: Option<NaiveDate>,
    pub amount: String,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self::for_date(Local::now().date_naive())
    }
}

impl FormDraft {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            description: String::new(),
            date: Some(date),
            amount: String::new(),
        }
    }

    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            date: Some(expense.date.date_naive()),
            amount: expense.amount.normalize().to_string(),
        }
    }

    /// Validates the draft and builds the record sent to the server.
    pub fn to_payload(&self) -> Result<ExpensePayload, ValidationError> {
        let description = self.description.trim();
        let amount = self.amount.trim();
        let Some(date) = self.date else {
            return Err(ValidationError::MissingFields);
        };
        if description.is_empty() || amount.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let amount = parse_amount(amount).ok_or(ValidationError::InvalidAmount)?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount);
        }

        Ok(ExpensePayload::new(description, midnight_utc(date), amount))
    }
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    // Digit separators are not part of what the form accepts.
    if raw.contains('_') {
        return None;
    }
    Decimal::from_str(&raw.replace(',', ".")).ok()
}

/// Accepts `YYYY-MM-DD` or the displayed `DD/MM/YYYY`.
pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub expenses: Vec<Expense>,
    pub total: Decimal,
    pub draft: FormDraft,
    pub edit_target: Option<ExpenseId>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ViewState {
    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }

    pub fn find(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub(crate) fn reset_draft(&mut self) {
        self.draft = FormDraft::default();
        self.edit_target = None;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn draft(description: &str, date: Option<NaiveDate>, amount: &str) -> FormDraft {
        FormDraft {
            description: description.to_string(),
            date,
            amount: amount.to_string(),
        }
    }

    fn feb_first() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 2, 1)
    }

    #[test]
    fn valid_draft_becomes_midnight_payload() {
        let payload = draft("Rent", feb_first(), "1500").to_payload().expect("payload");
        assert_eq!(payload.id, None);
        assert_eq!(payload.description, "Rent");
        assert_eq!(payload.date, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(payload.amount, Decimal::from(1500));
    }

    #[test]
    fn comma_separator_is_accepted() {
        let payload = draft("Coffee", feb_first(), "4,50").to_payload().expect("payload");
        assert_eq!(payload.amount, Decimal::new(450, 2));
    }

    #[test]
    fn missing_fields_are_rejected() {
        for candidate in [
            draft("", feb_first(), "10"),
            draft("   ", feb_first(), "10"),
            draft("Rent", None, "10"),
            draft("Rent", feb_first(), ""),
        ] {
            assert_eq!(candidate.to_payload(), Err(ValidationError::MissingFields));
        }
    }

    #[test]
    fn signed_and_exponent_amounts_are_numbers() {
        for (amount, expected) in [("+5", 5), ("1e3", 1000), ("1E3", 1000)] {
            let payload = draft("Rent", feb_first(), amount).to_payload().expect("payload");
            assert_eq!(payload.amount, Decimal::from(expected), "amount {amount:?}");
        }
    }

    #[test]
    fn non_positive_or_non_numeric_amounts_are_rejected() {
        for amount in ["abc", "0", "-3", "0.00", "NaN", "inf", "1..2", "1_000", "-1e3"] {
            assert_eq!(
                draft("Rent", feb_first(), amount).to_payload(),
                Err(ValidationError::InvalidAmount),
                "amount {amount:?}"
            );
        }
    }

    #[test]
    fn editing_draft_truncates_timestamp_to_date() {
        let expense = Expense {
            id: ExpenseId(1),
            description: "Coffee".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 5, 13, 45, 0).unwrap(),
            amount: Decimal::new(450, 2),
        };
        let draft = FormDraft::from_expense(&expense);
        assert_eq!(draft.description, "Coffee");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(draft.amount, "4.5");
    }

    #[test]
    fn editing_draft_uses_utc_calendar_date_for_offset_timestamps() {
        let expense = Expense {
            id: ExpenseId(2),
            description: "Jantar".to_string(),
            date: shared::timestamp::parse("2024-01-05T23:00:00-03:00").expect("timestamp"),
            amount: Decimal::from(80),
        };
        let draft = FormDraft::from_expense(&expense);
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 1, 6));
    }

    #[test]
    fn date_input_accepts_iso_and_display_forms() {
        assert_eq!(parse_date_input("2024-02-01"), feb_first());
        assert_eq!(parse_date_input("01/02/2024"), feb_first());
        assert_eq!(parse_date_input("02-01-2024"), None);
    }
}
