//! The transaction domain models and request payload validation.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, macros::format_description};

use crate::Error;

/// Whether a transaction or category records money coming in or going out.
///
/// Serialized as `"income"` or `"expense"` on the wire and in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in, e.g. a salary payment.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The lowercase string form used on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("invalid transaction kind '{other}'")),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|_| FromSqlError::InvalidType)
    }
}

/// A single income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction in the database.
    pub id: i64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money involved. Always non-negative, the sign is
    /// implied by `kind`.
    pub amount: f64,
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The name of the category this transaction belongs to.
    ///
    /// A free-text reference, not a foreign key. Nothing checks that a
    /// category with this name exists.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// When the record was inserted.
    pub created_at: OffsetDateTime,
    /// When the record was last written.
    pub updated_at: OffsetDateTime,
}

/// The request body for creating a transaction.
///
/// All fields are optional at the serde level so that missing fields show
/// up in the structured validation error instead of an opaque
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
    /// The amount of money involved.
    #[serde(default)]
    pub amount: Option<f64>,
    /// `"income"` or `"expense"`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// The name of the category this transaction belongs to.
    #[serde(default)]
    pub category: Option<String>,
    /// When the transaction happened, as `YYYY-MM-DD`. Defaults to today.
    #[serde(default)]
    pub date: Option<String>,
}

/// A [NewTransaction] that has passed field validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money involved.
    pub amount: f64,
    /// Whether this transaction is income or an expense.
    pub kind: TransactionKind,
    /// The name of the category this transaction belongs to.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
}

impl NewTransaction {
    /// Validate the request body, defaulting a missing date to `today`.
    ///
    /// # Errors
    /// Returns [Error::Validation] naming every failing field: an empty or
    /// missing description, a missing, non-finite or negative amount, an
    /// unknown kind, a missing category, or a date that is not `YYYY-MM-DD`.
    pub fn validate(self, today: Date) -> Result<ValidatedTransaction, Error> {
        let mut invalid_fields = Vec::new();

        let description = match self.description {
            Some(text) if !text.trim().is_empty() => Some(text),
            _ => {
                invalid_fields.push("description".to_string());
                None
            }
        };

        let amount = match self.amount {
            Some(amount) if amount.is_finite() && amount >= 0.0 => Some(amount),
            _ => {
                invalid_fields.push("amount".to_string());
                None
            }
        };

        let kind = match self.kind.as_deref().map(TransactionKind::from_str) {
            Some(Ok(kind)) => Some(kind),
            _ => {
                invalid_fields.push("type".to_string());
                None
            }
        };

        let category = match self.category {
            Some(name) if !name.trim().is_empty() => Some(name),
            _ => {
                invalid_fields.push("category".to_string());
                None
            }
        };

        let date_format = format_description!("[year]-[month]-[day]");
        let date = match self.date {
            None => Some(today),
            Some(ref text) => match Date::parse(text, &date_format) {
                Ok(date) => Some(date),
                Err(_) => {
                    invalid_fields.push("date".to_string());
                    None
                }
            },
        };

        if !invalid_fields.is_empty() {
            return Err(Error::Validation(invalid_fields));
        }

        // The unwraps cannot fail: a None in any field pushed onto
        // `invalid_fields`, which returns above.
        Ok(ValidatedTransaction {
            description: description.unwrap(),
            amount: amount.unwrap(),
            kind: kind.unwrap(),
            category: category.unwrap(),
            date: date.unwrap(),
        })
    }
}

#[cfg(test)]
mod new_transaction_tests {
    use time::macros::date;

    use crate::Error;

    use super::{NewTransaction, TransactionKind};

    fn valid_body() -> NewTransaction {
        NewTransaction {
            description: Some("Coffee".to_string()),
            amount: Some(4.5),
            kind: Some("expense".to_string()),
            category: Some("Dining".to_string()),
            date: Some("2024-03-05".to_string()),
        }
    }

    #[test]
    fn valid_body_passes() {
        let validated = valid_body().validate(date!(2024 - 06 - 01)).unwrap();

        assert_eq!(validated.description, "Coffee");
        assert_eq!(validated.amount, 4.5);
        assert_eq!(validated.kind, TransactionKind::Expense);
        assert_eq!(validated.category, "Dining");
        assert_eq!(validated.date, date!(2024 - 03 - 05));
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let today = date!(2024 - 06 - 01);
        let body = NewTransaction {
            date: None,
            ..valid_body()
        };

        let validated = body.validate(today).unwrap();

        assert_eq!(validated.date, today);
    }

    #[test]
    fn empty_body_names_all_required_fields() {
        let result = NewTransaction::default().validate(date!(2024 - 06 - 01));

        assert_eq!(
            result,
            Err(Error::Validation(vec![
                "description".to_string(),
                "amount".to_string(),
                "type".to_string(),
                "category".to_string(),
            ]))
        );
    }

    #[test]
    fn invalid_kind_is_rejected() {
        let body = NewTransaction {
            kind: Some("transfer".to_string()),
            ..valid_body()
        };

        let result = body.validate(date!(2024 - 06 - 01));

        assert_eq!(result, Err(Error::Validation(vec!["type".to_string()])));
    }

    #[test]
    fn negative_and_non_finite_amounts_are_rejected() {
        for amount in [-1.0, f64::NAN, f64::INFINITY] {
            let body = NewTransaction {
                amount: Some(amount),
                ..valid_body()
            };

            let result = body.validate(date!(2024 - 06 - 01));

            assert_eq!(
                result,
                Err(Error::Validation(vec!["amount".to_string()])),
                "amount {amount} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_date_is_rejected() {
        let body = NewTransaction {
            date: Some("05/03/2024".to_string()),
            ..valid_body()
        };

        let result = body.validate(date!(2024 - 06 - 01));

        assert_eq!(result, Err(Error::Validation(vec!["date".to_string()])));
    }

    #[test]
    fn kind_round_trips_through_strings() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            assert_eq!(kind.as_str().parse(), Ok(kind));
        }
    }
}
