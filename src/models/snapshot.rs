//! Per-user input snapshot
//!
//! Every engine call works over one user's immutable collection of records.
//! The snapshot is validated once when it crosses into the engine; the
//! aggregators never re-check it.

use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::ids::UserId;
use super::income::Income;
use super::subscription::{Payment, Subscription};
use super::transaction::Transaction;
use crate::error::{EngineError, EngineResult};

/// One user's records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub user_id: UserId,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    /// Persisted paid flags for derived subscription charges
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl LedgerSnapshot {
    /// Create an empty snapshot for a user
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// Check the record invariants and single-user ownership
    pub fn validate(&self) -> EngineResult<()> {
        for txn in &self.transactions {
            self.check_owner("Transaction", &txn.id.to_string(), txn.user_id)?;
        }

        for budget in &self.budgets {
            self.check_owner("Budget", &budget.id.to_string(), budget.user_id)?;
            budget
                .validate()
                .map_err(|e| EngineError::Validation(format!("budget {}: {}", budget.id, e)))?;
        }

        for sub in &self.subscriptions {
            self.check_owner("Subscription", &sub.id.to_string(), sub.user_id)?;
            if sub.amount.is_negative() {
                return Err(EngineError::Validation(format!(
                    "subscription {}: amount cannot be negative",
                    sub.id
                )));
            }
            if let Some(day) = sub.billing_day {
                if !(1..=31).contains(&day) {
                    return Err(EngineError::Validation(format!(
                        "subscription {}: billing day must be between 1 and 31, got {}",
                        sub.id, day
                    )));
                }
            }
        }

        for income in &self.incomes {
            self.check_owner("Income", &income.id.to_string(), income.user_id)?;
            income
                .validate()
                .map_err(|e| EngineError::Validation(format!("income {}: {}", income.id, e)))?;
        }

        Ok(())
    }

    fn check_owner(&self, entity: &str, id: &str, owner: UserId) -> EngineResult<()> {
        if owner != self.user_id {
            return Err(EngineError::Validation(format!(
                "{} {} belongs to {}, not {}",
                entity, id, owner, self.user_id
            )));
        }
        Ok(())
    }

    /// Check if the snapshot holds no records at all
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.budgets.is_empty()
            && self.subscriptions.is_empty()
            && self.incomes.is_empty()
            && self.payments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecurrenceRule};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_snapshot_is_valid() {
        let snapshot = LedgerSnapshot::new(UserId::new());
        assert!(snapshot.is_empty());
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_foreign_records_rejected() {
        let mut snapshot = LedgerSnapshot::new(UserId::new());
        snapshot.transactions.push(Transaction::new(
            UserId::new(),
            Money::from_units(5),
            "Food",
            date(2024, 1, 1),
        ));
        let err = snapshot.validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_budget_rejected() {
        let user = UserId::new();
        let mut snapshot = LedgerSnapshot::new(user);
        snapshot.budgets.push(Budget::recurring(
            user,
            "Food",
            Money::zero(),
            RecurrenceRule::monthly(1, date(2024, 1, 1)),
        ));
        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }
}
