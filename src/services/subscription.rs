//! Subscription scheduling
//!
//! Derives the due dates of a subscription from its billing cycle and start
//! date, and aggregates subscription totals. Monthly and yearly charges land
//! on the billing day, clamped to the month's length the same way budget
//! reset days are.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::period::{clamped_date, shift_month};
use crate::models::{
    BillingCycle, DateRange, Money, Payment, Subscription, SubscriptionId, SubscriptionStatus,
};

/// A derived charge with the owning subscription's details attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionCharge {
    pub subscription_id: SubscriptionId,
    pub name: String,
    pub category: Option<String>,
    pub status: SubscriptionStatus,
    pub date: NaiveDate,
    pub amount: Money,
    pub is_paid: bool,
}

/// Lazy, finite sequence of due payments within a date range
#[derive(Debug, Clone)]
pub struct PaymentSchedule<'a> {
    subscription: &'a Subscription,
    range: DateRange,
    cutoff: Option<NaiveDate>,
    index: u32,
    finished: bool,
}

impl<'a> PaymentSchedule<'a> {
    fn new(subscription: &'a Subscription, range_start: NaiveDate, range_end: NaiveDate) -> Self {
        let cutoff = match (subscription.status, subscription.last_active_date()) {
            (_, Some(end)) => Some(end),
            // Stopped with no recorded stop date: nothing can be shown as due.
            (SubscriptionStatus::Paused | SubscriptionStatus::Cancelled, None) => {
                subscription.start_date.pred_opt()
            }
            (SubscriptionStatus::Active, None) => None,
        };

        Self {
            subscription,
            range: DateRange {
                start: range_start,
                end: range_end,
            },
            cutoff,
            index: first_candidate_index(subscription, range_start),
            finished: range_end < range_start,
        }
    }
}

impl Iterator for PaymentSchedule<'_> {
    type Item = Payment;

    fn next(&mut self) -> Option<Payment> {
        while !self.finished {
            let Some(date) = due_date(self.subscription, self.index) else {
                self.finished = true;
                break;
            };
            self.index += 1;

            let past_cutoff = self.cutoff.is_some_and(|cutoff| date > cutoff);
            if date > self.range.end || past_cutoff {
                self.finished = true;
                break;
            }
            if date < self.range.start {
                continue;
            }

            return Some(Payment::new(
                self.subscription.id,
                date,
                self.subscription.amount,
            ));
        }
        None
    }
}

/// The `index`-th due date of a subscription, counting the start date as 0
fn due_date(subscription: &Subscription, index: u32) -> Option<NaiveDate> {
    let start = subscription.start_date;
    if index == 0 {
        return Some(start);
    }

    match subscription.billing_cycle {
        BillingCycle::Daily => start.checked_add_signed(Duration::days(index as i64)),
        BillingCycle::Weekly => start.checked_add_signed(Duration::weeks(index as i64)),
        BillingCycle::Monthly => {
            let (year, month) = shift_month(start.year(), start.month(), index as i32);
            NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(clamped_date(year, month, subscription.effective_billing_day()))
        }
        BillingCycle::Yearly => {
            let year = start.year().checked_add(index as i32)?;
            NaiveDate::from_ymd_opt(year, start.month(), 1)?;
            Some(clamped_date(
                year,
                start.month(),
                subscription.effective_billing_day(),
            ))
        }
    }
}

/// An index whose due date is on or before `range_start`, so iteration can
/// skip the history before the range without missing a charge
fn first_candidate_index(subscription: &Subscription, range_start: NaiveDate) -> u32 {
    let start = subscription.start_date;
    if range_start <= start {
        return 0;
    }

    let steps = match subscription.billing_cycle {
        BillingCycle::Daily => (range_start - start).num_days(),
        BillingCycle::Weekly => (range_start - start).num_days() / 7,
        BillingCycle::Monthly => {
            let months = (range_start.year() - start.year()) as i64 * 12
                + range_start.month() as i64
                - start.month() as i64;
            months - 1
        }
        BillingCycle::Yearly => (range_start.year() - start.year()) as i64 - 1,
    };

    steps.clamp(0, u32::MAX as i64) as u32
}

/// Aggregate subscription figures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionTotals {
    /// Per-cycle amounts of active subscriptions
    pub active_total: Money,
    /// Per-cycle amounts of paused and cancelled subscriptions
    pub inactive_total: Money,
    /// Sum of payments flagged as paid
    pub total_paid: Money,
    pub active_count: usize,
    pub inactive_count: usize,
    /// Active subscriptions normalized to a monthly cost
    pub active_monthly_cost: Money,
}

/// Subscription charges falling inside a reporting window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionWindow {
    pub window: DateRange,
    pub charges: Vec<SubscriptionCharge>,
    /// Charges of active subscriptions
    pub active_total: Money,
    /// Historical charges of paused and cancelled subscriptions
    pub inactive_total: Money,
    pub due_count: usize,
    pub due_total: Money,
    pub paid_total: Money,
    pub unpaid_total: Money,
}

/// Derives payment schedules and subscription totals
pub struct SubscriptionScheduler;

impl SubscriptionScheduler {
    /// Due payments of `subscription` within `[range_start, range_end]`.
    ///
    /// Paused and cancelled subscriptions stop at their end date.
    pub fn generate_payments(
        subscription: &Subscription,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> PaymentSchedule<'_> {
        PaymentSchedule::new(subscription, range_start, range_end)
    }

    /// First due date on or after `reference`, if any remain
    pub fn next_due(subscription: &Subscription, reference: NaiveDate) -> Option<NaiveDate> {
        Self::generate_payments(subscription, reference, NaiveDate::MAX)
            .next()
            .map(|payment| payment.date)
    }

    /// Total charged by one subscription within a window
    pub fn amount_for_period(subscription: &Subscription, window: &DateRange) -> Money {
        Self::generate_payments(subscription, window.start, window.end)
            .map(|payment| payment.amount)
            .sum()
    }

    /// Per-cycle amount expressed as a monthly cost
    pub fn monthly_cost(subscription: &Subscription) -> Money {
        match subscription.billing_cycle {
            BillingCycle::Daily => subscription.amount.times(30),
            BillingCycle::Weekly => subscription.amount.times(4),
            BillingCycle::Monthly => subscription.amount,
            BillingCycle::Yearly => subscription.amount.divide_rounded(12),
        }
    }

    /// Active/inactive totals over subscriptions plus the paid total over
    /// `payments`
    pub fn totals(subscriptions: &[Subscription], payments: &[Payment]) -> SubscriptionTotals {
        let mut totals = SubscriptionTotals::default();

        for sub in subscriptions {
            let amount = sub.amount.spend_contribution();
            if sub.status.is_active() {
                totals.active_total += amount;
                totals.active_count += 1;
                totals.active_monthly_cost += Self::monthly_cost(sub).spend_contribution();
            } else {
                totals.inactive_total += amount;
                totals.inactive_count += 1;
            }
        }

        totals.total_paid = payments
            .iter()
            .filter(|payment| payment.is_paid)
            .map(|payment| payment.amount.spend_contribution())
            .sum();

        totals
    }

    /// [`SubscriptionScheduler::totals`] with `total_paid` limited to
    /// payments dated inside `window`
    pub fn totals_for_window(
        subscriptions: &[Subscription],
        payments: &[Payment],
        window: &DateRange,
    ) -> SubscriptionTotals {
        let window_payments: Vec<Payment> = payments
            .iter()
            .filter(|payment| window.contains(payment.date))
            .cloned()
            .collect();
        Self::totals(subscriptions, &window_payments)
    }

    /// Every charge due within `window`, with persisted paid flags merged in
    pub fn charges_in_window(
        subscriptions: &[Subscription],
        payments: &[Payment],
        window: &DateRange,
    ) -> Vec<SubscriptionCharge> {
        let paid: HashMap<(SubscriptionId, NaiveDate), bool> = payments
            .iter()
            .map(|p| ((p.subscription_id, p.date), p.is_paid))
            .collect();

        let mut charges: Vec<SubscriptionCharge> = subscriptions
            .iter()
            .flat_map(|sub| {
                let paid = &paid;
                Self::generate_payments(sub, window.start, window.end).map(move |payment| {
                    SubscriptionCharge {
                        subscription_id: sub.id,
                        name: sub.name.clone(),
                        category: sub.category.clone(),
                        status: sub.status,
                        is_paid: paid
                            .get(&(sub.id, payment.date))
                            .copied()
                            .unwrap_or(false),
                        date: payment.date,
                        amount: payment.amount,
                    }
                })
            })
            .collect();

        charges.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
        charges
    }

    /// Summarize the charges due within `window`
    pub fn window_summary(
        subscriptions: &[Subscription],
        payments: &[Payment],
        window: &DateRange,
    ) -> SubscriptionWindow {
        let charges = Self::charges_in_window(subscriptions, payments, window);

        let mut summary = SubscriptionWindow {
            window: *window,
            charges: Vec::new(),
            active_total: Money::zero(),
            inactive_total: Money::zero(),
            due_count: charges.len(),
            due_total: Money::zero(),
            paid_total: Money::zero(),
            unpaid_total: Money::zero(),
        };

        for charge in &charges {
            let amount = charge.amount.spend_contribution();
            summary.due_total += amount;
            if charge.status.is_active() {
                summary.active_total += amount;
            } else {
                summary.inactive_total += amount;
            }
            if charge.is_paid {
                summary.paid_total += amount;
            } else {
                summary.unpaid_total += amount;
            }
        }

        summary.charges = charges;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subscription(cycle: BillingCycle, cents: i64, start: NaiveDate) -> Subscription {
        Subscription::new(UserId::new(), "Service", Money::from_cents(cents), cycle, start)
    }

    fn dates(schedule: PaymentSchedule<'_>) -> Vec<NaiveDate> {
        schedule.map(|p| p.date).collect()
    }

    #[test]
    fn test_monthly_schedule_excludes_past_range_end() {
        let sub = subscription(BillingCycle::Monthly, 1500, date(2024, 1, 10)).with_billing_day(10);
        let due = dates(SubscriptionScheduler::generate_payments(
            &sub,
            date(2024, 1, 1),
            date(2024, 4, 1),
        ));
        assert_eq!(due, vec![date(2024, 1, 10), date(2024, 2, 10), date(2024, 3, 10)]);
    }

    #[test]
    fn test_monthly_billing_day_clamped() {
        let sub = subscription(BillingCycle::Monthly, 999, date(2024, 1, 31)).with_billing_day(31);
        let due = dates(SubscriptionScheduler::generate_payments(
            &sub,
            date(2024, 1, 1),
            date(2024, 5, 31),
        ));
        assert_eq!(
            due,
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30),
                date(2024, 5, 31)
            ]
        );
    }

    #[test]
    fn test_dates_before_range_skipped() {
        let sub = subscription(BillingCycle::Weekly, 500, date(2024, 1, 1));
        let due = dates(SubscriptionScheduler::generate_payments(
            &sub,
            date(2024, 3, 1),
            date(2024, 3, 14),
        ));
        assert_eq!(due, vec![date(2024, 3, 4), date(2024, 3, 11)]);
    }

    #[test]
    fn test_daily_and_yearly_cycles() {
        let daily = subscription(BillingCycle::Daily, 100, date(2024, 2, 27));
        let due = dates(SubscriptionScheduler::generate_payments(
            &daily,
            date(2024, 2, 28),
            date(2024, 3, 1),
        ));
        assert_eq!(due, vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]);

        let yearly = subscription(BillingCycle::Yearly, 9900, date(2020, 2, 29));
        let due = dates(SubscriptionScheduler::generate_payments(
            &yearly,
            date(2021, 1, 1),
            date(2024, 12, 31),
        ));
        assert_eq!(
            due,
            vec![date(2021, 2, 28), date(2022, 2, 28), date(2023, 2, 28), date(2024, 2, 29)]
        );
    }

    #[test]
    fn test_cancelled_stops_at_end_date() {
        let sub = subscription(BillingCycle::Monthly, 1500, date(2024, 1, 10))
            .ended(SubscriptionStatus::Cancelled, date(2024, 3, 1));
        let due = dates(SubscriptionScheduler::generate_payments(
            &sub,
            date(2024, 1, 1),
            date(2024, 12, 31),
        ));
        assert_eq!(due, vec![date(2024, 1, 10), date(2024, 2, 10)]);
    }

    #[test]
    fn test_paused_without_stop_date_yields_nothing() {
        let mut sub = subscription(BillingCycle::Monthly, 1500, date(2024, 1, 10));
        sub.status = SubscriptionStatus::Paused;
        let mut schedule =
            SubscriptionScheduler::generate_payments(&sub, date(2024, 1, 1), date(2024, 12, 31));
        assert!(schedule.next().is_none());
    }

    #[test]
    fn test_empty_when_range_inverted_or_before_start() {
        let sub = subscription(BillingCycle::Daily, 100, date(2024, 5, 1));
        assert_eq!(
            SubscriptionScheduler::generate_payments(&sub, date(2024, 5, 10), date(2024, 5, 1))
                .count(),
            0
        );
        assert_eq!(
            SubscriptionScheduler::generate_payments(&sub, date(2024, 1, 1), date(2024, 4, 30))
                .count(),
            0
        );
    }

    #[test]
    fn test_next_due() {
        let sub = subscription(BillingCycle::Monthly, 1500, date(2024, 1, 10));
        assert_eq!(
            SubscriptionScheduler::next_due(&sub, date(2024, 3, 11)),
            Some(date(2024, 4, 10))
        );

        let stopped = sub.ended(SubscriptionStatus::Cancelled, date(2024, 3, 1));
        assert_eq!(SubscriptionScheduler::next_due(&stopped, date(2024, 3, 11)), None);
    }

    #[test]
    fn test_totals() {
        let user = UserId::new();
        let start = date(2024, 1, 1);
        let active = Subscription::new(user, "Music", Money::from_units(15), BillingCycle::Monthly, start);
        let yearly = Subscription::new(user, "Cloud", Money::from_units(120), BillingCycle::Yearly, start);
        let paused = Subscription::new(user, "Gym", Money::from_units(40), BillingCycle::Monthly, start)
            .ended(SubscriptionStatus::Paused, date(2024, 2, 1));
        let payments = vec![
            Payment::new(active.id, date(2024, 1, 1), Money::from_units(15)).paid(),
            Payment::new(active.id, date(2024, 2, 1), Money::from_units(15)),
            Payment::new(paused.id, date(2024, 1, 1), Money::from_units(40)).paid(),
        ];

        let totals = SubscriptionScheduler::totals(&[active, yearly, paused], &payments);
        assert_eq!(totals.active_total, Money::from_units(135));
        assert_eq!(totals.inactive_total, Money::from_units(40));
        assert_eq!(totals.total_paid, Money::from_units(55));
        assert_eq!(totals.active_count, 2);
        assert_eq!(totals.inactive_count, 1);
        assert_eq!(totals.active_monthly_cost, Money::from_units(25));
    }

    #[test]
    fn test_totals_for_window_counts_window_payments_only() {
        let sub = subscription(BillingCycle::Monthly, 1500, date(2024, 1, 10));
        let payments = vec![
            Payment::new(sub.id, date(2024, 1, 10), Money::from_cents(1500)).paid(),
            Payment::new(sub.id, date(2024, 2, 10), Money::from_cents(1500)).paid(),
            Payment::new(sub.id, date(2024, 3, 10), Money::from_cents(1500)).paid(),
        ];
        let march = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();

        let windowed = SubscriptionScheduler::totals_for_window(&[sub.clone()], &payments, &march);
        assert_eq!(windowed.total_paid.cents(), 1500);
        assert_eq!(windowed.active_total.cents(), 1500);

        let all_time = SubscriptionScheduler::totals(&[sub], &payments);
        assert_eq!(all_time.total_paid.cents(), 4500);
    }

    #[test]
    fn test_monthly_cost_normalization() {
        let start = date(2024, 1, 1);
        assert_eq!(
            SubscriptionScheduler::monthly_cost(&subscription(BillingCycle::Daily, 100, start)).cents(),
            3000
        );
        assert_eq!(
            SubscriptionScheduler::monthly_cost(&subscription(BillingCycle::Weekly, 250, start)).cents(),
            1000
        );
        assert_eq!(
            SubscriptionScheduler::monthly_cost(&subscription(BillingCycle::Yearly, 9999, start)).cents(),
            833
        );
    }

    #[test]
    fn test_window_summary_merges_paid_flags() {
        let sub = subscription(BillingCycle::Monthly, 1500, date(2024, 1, 10)).with_category("Music");
        let payments = vec![Payment::new(sub.id, date(2024, 3, 10), Money::from_cents(1500)).paid()];
        let window = DateRange::new(date(2024, 2, 1), date(2024, 3, 31)).unwrap();

        let summary = SubscriptionScheduler::window_summary(&[sub], &payments, &window);
        assert_eq!(summary.due_count, 2);
        assert_eq!(summary.due_total.cents(), 3000);
        assert_eq!(summary.paid_total.cents(), 1500);
        assert_eq!(summary.unpaid_total.cents(), 1500);
        assert!(!summary.charges[0].is_paid);
        assert!(summary.charges[1].is_paid);
        assert_eq!(summary.charges[0].category.as_deref(), Some("Music"));
    }

    #[test]
    fn test_amount_for_period() {
        let sub = subscription(BillingCycle::Weekly, 500, date(2024, 3, 1));
        let march = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        assert_eq!(SubscriptionScheduler::amount_for_period(&sub, &march).cents(), 2500);
    }
}
