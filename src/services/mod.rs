//! Service layer for LedgerPulse
//!
//! The services hold the engine's temporal and numeric rules: resolving
//! active periods, matching entries to categories, and computing the
//! derived budget, subscription and income figures.

pub mod budget;
pub mod category;
pub mod income;
pub mod period;
pub mod subscription;

pub use budget::{BudgetStatus, BudgetTotals, SpendingAggregator};
pub use category::{CategoryBreakdown, CategoryMatcher, CategoryRollup, CategoryTotals};
pub use income::{IncomeDetail, IncomeNetCalculator, IncomeStatus, SourceTotal};
pub use period::{PeriodResolution, PeriodResolver};
pub use subscription::{
    PaymentSchedule, SubscriptionCharge, SubscriptionScheduler, SubscriptionTotals,
    SubscriptionWindow,
};
