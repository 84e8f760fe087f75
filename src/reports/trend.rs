//! Spending Trend Report
//!
//! Buckets transaction spending across a reporting window for charting.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::io::Write;

use crate::error::EngineResult;
use crate::models::period::{clamped_date, days_in_month};
use crate::models::{DateRange, Money, ReportingPeriod, Transaction};
use crate::services::PeriodResolver;

/// One point of the series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendBucket {
    /// Axis label
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total: Money,
    pub transaction_count: usize,
}

/// Spending series over a reporting window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingTrend {
    pub period: ReportingPeriod,
    pub window: DateRange,
    pub buckets: Vec<TrendBucket>,
    pub total: Money,
}

impl SpendingTrend {
    /// Bucket `transactions` over the window of `period` containing
    /// `reference`.
    ///
    /// Daily, weekly and monthly windows get one bucket per day; yearly
    /// windows get one per calendar month.
    pub fn generate(
        resolver: &PeriodResolver,
        period: ReportingPeriod,
        reference: NaiveDate,
        transactions: &[Transaction],
    ) -> Self {
        let window = resolver.reporting_window(period, reference);
        let mut buckets = match period {
            ReportingPeriod::Yearly => month_buckets(&window),
            _ => day_buckets(period, &window),
        };

        for txn in transactions.iter().filter(|txn| txn.is_within(&window)) {
            // Buckets are contiguous and ordered, so a binary search finds the slot.
            let slot = buckets.partition_point(|bucket| bucket.end < txn.date);
            if let Some(bucket) = buckets.get_mut(slot) {
                bucket.total += txn.spend();
                bucket.transaction_count += 1;
            }
        }

        let total = buckets.iter().map(|bucket| bucket.total).sum();
        Self {
            period,
            window,
            buckets,
            total,
        }
    }

    /// The bucket with the largest total, earliest first on ties
    pub fn peak(&self) -> Option<&TrendBucket> {
        self.buckets
            .iter()
            .rev()
            .max_by_key(|bucket| bucket.total)
            .filter(|bucket| bucket.total.is_positive())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Trend: {} ({})\n",
            self.period.label(),
            self.window
        ));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        let widest = self
            .buckets
            .iter()
            .map(|bucket| bucket.total.cents())
            .max()
            .unwrap_or(0);

        for bucket in &self.buckets {
            let bar_len = if widest > 0 {
                (bucket.total.cents() * 24 / widest) as usize
            } else {
                0
            };
            output.push_str(&format!(
                "{:<10} {:>12} {}\n",
                bucket.label,
                bucket.total.format_with_symbol(currency_symbol),
                "#".repeat(bar_len)
            ));
        }

        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>12}\n",
            "Total",
            self.total.format_with_symbol(currency_symbol)
        ));

        output
    }

    /// Export the series to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> EngineResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Label", "Start", "End", "Total", "Transactions"])?;

        for bucket in &self.buckets {
            csv_writer.write_record([
                bucket.label.clone(),
                bucket.start.to_string(),
                bucket.end.to_string(),
                bucket.total.to_decimal_string(),
                bucket.transaction_count.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

fn day_buckets(period: ReportingPeriod, window: &DateRange) -> Vec<TrendBucket> {
    let format = match period {
        ReportingPeriod::Monthly => "%d",
        _ => "%a %d",
    };

    window
        .days()
        .map(|day| TrendBucket {
            label: day.format(format).to_string(),
            start: day,
            end: day,
            total: Money::zero(),
            transaction_count: 0,
        })
        .collect()
}

fn month_buckets(window: &DateRange) -> Vec<TrendBucket> {
    let year = window.start.year();
    (1..=12)
        .map(|month| {
            let start = clamped_date(year, month, 1);
            TrendBucket {
                label: start.format("%b").to_string(),
                start,
                end: clamped_date(year, month, days_in_month(year, month)),
                total: Money::zero(),
                transaction_count: 0,
            }
        })
        .collect()
}
