//! Transaction model
//!
//! An ad-hoc expense recorded by the user. Amounts are non-negative expense
//! magnitudes; income is tracked separately and never inferred from a
//! transaction's sign.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::CategoryKey;
use super::ids::{TransactionId, UserId};
use super::money::Money;
use super::period::DateRange;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owning user
    pub user_id: UserId,

    /// Expense magnitude
    pub amount: Money,

    /// Free-text category label (may be missing)
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Transaction date
    pub date: NaiveDate,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        user_id: UserId,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            amount,
            category: Some(category.into()),
            description: String::new(),
            date,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Normalized category key
    pub fn category_key(&self) -> CategoryKey {
        CategoryKey::normalize(self.category.as_deref())
    }

    /// Check if the transaction is dated within a range
    pub fn is_within(&self, range: &DateRange) -> bool {
        range.contains(self.date)
    }

    /// Amount counted toward spend totals
    pub fn spend(&self) -> Money {
        self.amount.spend_contribution()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category.as_deref().unwrap_or("-"),
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transaction() {
        let user = UserId::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let txn = Transaction::new(user, Money::from_units(120), "groceries", date)
            .with_description("weekly shop");

        assert_eq!(txn.user_id, user);
        assert_eq!(txn.category_key(), CategoryKey::from_label("Groceries"));
        assert_eq!(txn.description, "weekly shop");
    }

    #[test]
    fn test_negative_amount_contributes_nothing() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let txn = Transaction::new(UserId::new(), Money::from_cents(-900), "Food", date);
        assert_eq!(txn.spend(), Money::zero());
    }

    #[test]
    fn test_missing_category_deserializes() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "user_id": "550e8400-e29b-41d4-a716-446655440001",
            "amount": "4.50",
            "date": "2024-03-05"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.amount.cents(), 450);
        assert!(txn.category_key().is_uncategorized());
        assert!(txn.description.is_empty());
    }
}
