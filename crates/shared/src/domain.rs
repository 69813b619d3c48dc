use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of an expense record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub i64);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted expense as returned by `/api/Gastos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "data", with = "crate::timestamp")]
    pub date: DateTime<Utc>,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Request body for create (no id) and full-replacement update (id set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ExpenseId>,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "data", with = "crate::timestamp")]
    pub date: DateTime<Utc>,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl ExpensePayload {
    pub fn new(description: impl Into<String>, date: DateTime<Utc>, amount: Decimal) -> Self {
        Self {
            id: None,
            description: description.into(),
            date,
            amount,
        }
    }

    pub fn with_id(mut self, id: ExpenseId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            description: self.description,
            date: self.date,
            amount: self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::timestamp::midnight_utc;

    #[test]
    fn decodes_listing_entry_with_utc_suffix() {
        let expense: Expense = serde_json::from_value(json!({
            "id": 1,
            "descricao": "Coffee",
            "data": "2024-01-05T00:00:00Z",
            "valor": 4.50
        }))
        .expect("expense");

        assert_eq!(expense.id, ExpenseId(1));
        assert_eq!(expense.description, "Coffee");
        assert_eq!(
            expense.date.date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 5).expect("date")
        );
        assert_eq!(expense.amount, Decimal::new(45, 1));
    }

    #[test]
    fn decodes_entry_without_offset_and_integer_amount() {
        let expense: Expense = serde_json::from_value(json!({
            "id": 7,
            "descricao": "Rent",
            "data": "2024-02-01T00:00:00",
            "valor": 1500
        }))
        .expect("expense");

        assert_eq!(
            expense.date,
            midnight_utc(NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"))
        );
        assert_eq!(expense.amount, Decimal::from(1500));
    }

    #[test]
    fn create_payload_omits_id() {
        let payload = ExpensePayload::new(
            "Rent",
            midnight_utc(NaiveDate::from_ymd_opt(2024, 2, 1).expect("date")),
            Decimal::from(1500),
        );
        let body = serde_json::to_value(&payload).expect("json");

        assert!(body.get("id").is_none());
        assert_eq!(body["descricao"], "Rent");
        assert_eq!(body["data"], "2024-02-01T00:00:00.000Z");
        assert_eq!(body["valor"].as_f64(), Some(1500.0));
    }

    #[test]
    fn update_payload_carries_id() {
        let payload = ExpensePayload::new(
            "Rent",
            midnight_utc(NaiveDate::from_ymd_opt(2024, 2, 1).expect("date")),
            Decimal::from(1500),
        )
        .with_id(ExpenseId(3));
        let body = serde_json::to_value(&payload).expect("json");

        assert_eq!(body["id"], 3);
    }
}
