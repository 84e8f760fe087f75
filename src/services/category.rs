//! Category matching
//!
//! Groups transactions and subscription charges by normalized category
//! label. Totals are exact cent sums, so the input order never changes the
//! result.

use serde::Serialize;
use std::collections::BTreeMap;

use super::subscription::SubscriptionCharge;
use crate::models::category::display_label;
use crate::models::{CategoryKey, Money, Transaction, UNCATEGORIZED};

/// Spend attributed to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    /// Display label for the category
    pub label: String,
    pub transactions: Money,
    pub subscriptions: Money,
    pub transaction_count: usize,
    pub subscription_count: usize,
}

impl CategoryTotals {
    fn empty(key: &CategoryKey, label: String) -> Self {
        Self {
            label: if key.is_uncategorized() {
                UNCATEGORIZED.to_string()
            } else {
                label
            },
            transactions: Money::zero(),
            subscriptions: Money::zero(),
            transaction_count: 0,
            subscription_count: 0,
        }
    }

    /// Combined spend
    pub fn total(&self) -> Money {
        self.transactions + self.subscriptions
    }

    // Keep the smallest spelling so the label does not depend on input order.
    fn offer_label(&mut self, label: String) {
        if label < self.label && self.label != UNCATEGORIZED {
            self.label = label;
        }
    }
}

/// One row of a category breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub transactions: Money,
    pub subscriptions: Money,
    pub total: Money,
    /// Share of the grand total, 0-100
    pub percentage: f64,
}

/// Per-category spend keyed by normalized label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRollup {
    totals: BTreeMap<CategoryKey, CategoryTotals>,
}

impl CategoryRollup {
    /// Totals for one category
    pub fn get(&self, key: &CategoryKey) -> Option<&CategoryTotals> {
        self.totals.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryKey, &CategoryTotals)> {
        self.totals.iter()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Sum across every category
    pub fn grand_total(&self) -> Money {
        self.totals.values().map(CategoryTotals::total).sum()
    }

    pub fn transaction_total(&self) -> Money {
        self.totals.values().map(|t| t.transactions).sum()
    }

    pub fn subscription_total(&self) -> Money {
        self.totals.values().map(|t| t.subscriptions).sum()
    }

    /// Rows with their share of the grand total, largest first
    pub fn breakdown(&self) -> Vec<CategoryBreakdown> {
        let grand_total = self.grand_total();

        let mut rows: Vec<CategoryBreakdown> = self
            .totals
            .values()
            .map(|totals| CategoryBreakdown {
                category: totals.label.clone(),
                transactions: totals.transactions,
                subscriptions: totals.subscriptions,
                total: totals.total(),
                percentage: totals.total().percent_of(grand_total),
            })
            .collect();

        rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
        rows
    }

    fn entry(&mut self, raw: Option<&str>) -> &mut CategoryTotals {
        let key = CategoryKey::normalize(raw);
        let label = display_label(raw);
        let totals = self
            .totals
            .entry(key.clone())
            .or_insert_with(|| CategoryTotals::empty(&key, label.clone()));
        totals.offer_label(label);
        totals
    }
}

/// Groups ledger entries by category
pub struct CategoryMatcher;

impl CategoryMatcher {
    /// Group transactions and subscription charges by normalized category
    pub fn group_by_category(
        transactions: &[Transaction],
        charges: &[SubscriptionCharge],
    ) -> CategoryRollup {
        let mut rollup = CategoryRollup::default();

        for txn in transactions {
            let totals = rollup.entry(txn.category.as_deref());
            totals.transactions += txn.spend();
            totals.transaction_count += 1;
        }

        for charge in charges {
            let totals = rollup.entry(charge.category.as_deref());
            totals.subscriptions += charge.amount.spend_contribution();
            totals.subscription_count += 1;
        }

        rollup
    }

    /// Transactions whose category matches `key`
    pub fn matching<'a>(
        transactions: &'a [Transaction],
        key: &'a CategoryKey,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        transactions.iter().filter(move |txn| txn.category_key() == *key)
    }
}
