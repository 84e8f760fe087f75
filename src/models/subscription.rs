//! Subscription model
//!
//! A recurring charge with a billing cycle. The individual charges
//! ([`Payment`]) are derived from the schedule; only their paid flags are
//! persisted by the collaborator store.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::CategoryKey;
use super::ids::{SubscriptionId, UserId};
use super::money::Money;
use crate::error::EngineError;

/// Recurrence interval of a subscription charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum BillingCycle {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingCycle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(EngineError::InvalidCycle(s.to_string())),
        }
    }
}

impl TryFrom<String> for BillingCycle {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Lifecycle state of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Paused,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Paused => write!(f, "Paused"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A recurring charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique identifier
    pub id: SubscriptionId,

    /// Owning user
    pub user_id: UserId,

    pub name: String,

    /// Charge per cycle
    pub amount: Money,

    pub billing_cycle: BillingCycle,

    /// Day of month charges land on for monthly/yearly cycles
    #[serde(default)]
    pub billing_day: Option<u32>,

    /// Date of the first charge
    pub start_date: NaiveDate,

    /// Pause or cancellation date; no charges are due after it
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub status: SubscriptionStatus,

    #[serde(default)]
    pub category: Option<String>,
}

impl Subscription {
    /// Create a new active subscription
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        amount: Money,
        billing_cycle: BillingCycle,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: SubscriptionId::new(),
            user_id,
            name: name.into(),
            amount,
            billing_cycle,
            billing_day: None,
            start_date,
            end_date: None,
            status: SubscriptionStatus::Active,
            category: None,
        }
    }

    pub fn with_billing_day(mut self, day: u32) -> Self {
        self.billing_day = Some(day);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Mark the subscription paused or cancelled as of `date`
    pub fn ended(mut self, status: SubscriptionStatus, date: NaiveDate) -> Self {
        self.status = status;
        self.end_date = Some(date);
        self
    }

    /// Effective billing day, falling back to the start date's day of month
    pub fn effective_billing_day(&self) -> u32 {
        self.billing_day.unwrap_or_else(|| self.start_date.day())
    }

    /// Normalized category key
    pub fn category_key(&self) -> CategoryKey {
        CategoryKey::normalize(self.category.as_deref())
    }

    /// Last date a charge may fall on, if the subscription has stopped
    pub fn last_active_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}/{}", self.name, self.amount, self.billing_cycle)
    }
}

/// A single due charge of a subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub subscription_id: SubscriptionId,
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default)]
    pub is_paid: bool,
}

impl Payment {
    pub fn new(subscription_id: SubscriptionId, date: NaiveDate, amount: Money) -> Self {
        Self {
            subscription_id,
            date,
            amount,
            is_paid: false,
        }
    }

    pub fn paid(mut self) -> Self {
        self.is_paid = true;
        self
    }
}
