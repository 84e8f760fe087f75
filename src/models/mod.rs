//! Core data models for LedgerPulse
//!
//! This module contains the value types the engine reads: transactions,
//! budgets, subscriptions, income deposits, and the calendar and money
//! primitives they are built from.

pub mod budget;
pub mod category;
pub mod ids;
pub mod income;
pub mod money;
pub mod period;
pub mod snapshot;
pub mod subscription;
pub mod transaction;

pub use budget::{Budget, BudgetSchedule, BudgetValidationError, RecurrenceRule};
pub use category::{CategoryKey, UNCATEGORIZED};
pub use ids::{BudgetId, IncomeId, SubscriptionId, TransactionId, UserId};
pub use income::{Income, IncomeValidationError};
pub use money::{Money, MoneyParseError};
pub use period::{DateRange, Recurrence, ReportingPeriod};
pub use snapshot::LedgerSnapshot;
pub use subscription::{BillingCycle, Payment, Subscription, SubscriptionStatus};
pub use transaction::Transaction;
