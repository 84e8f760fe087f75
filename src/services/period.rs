//! Period resolution
//!
//! Turns a budget schedule and a reference date into the active period's
//! boundaries. The same rules produce dashboard reporting windows, so every
//! recurring figure in the engine shares one notion of "current period".

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::config::settings::Settings;
use crate::error::EngineResult;
use crate::models::period::{clamped_date, day_before, shift_month};
use crate::models::{BudgetSchedule, DateRange, Recurrence, RecurrenceRule, ReportingPeriod};

/// Outcome of resolving a schedule at a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodResolution {
    /// The period containing the reference date
    Active(DateRange),
    /// The rule expired before the current period began; carries the last
    /// period that was in force
    Expired { last_period: DateRange },
}

impl PeriodResolution {
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired { .. })
    }

    /// The period to aggregate over, active or historical
    pub fn range(&self) -> DateRange {
        match self {
            Self::Active(range) => *range,
            Self::Expired { last_period } => *last_period,
        }
    }
}

/// Resolves active periods for recurrence rules
#[derive(Debug, Clone, Copy)]
pub struct PeriodResolver {
    week_start: Weekday,
}

impl Default for PeriodResolver {
    fn default() -> Self {
        Self::new(Weekday::Mon)
    }
}

impl PeriodResolver {
    /// Create a resolver whose weeks begin on `week_start`
    pub fn new(week_start: Weekday) -> Self {
        Self { week_start }
    }

    /// Create a resolver using the configured week start
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.week_start())
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Resolve a budget schedule at `reference`.
    ///
    /// Fixed schedules come back verbatim; an inverted fixed range is an
    /// `InvalidPeriod` error.
    pub fn resolve(
        &self,
        schedule: &BudgetSchedule,
        reference: NaiveDate,
    ) -> EngineResult<PeriodResolution> {
        match schedule {
            BudgetSchedule::Fixed(range) => {
                let range = DateRange::new(range.start, range.end)?;
                Ok(PeriodResolution::Active(range))
            }
            BudgetSchedule::Recurring(rule) => Ok(self.resolve_rule(rule, reference)),
        }
    }

    /// Resolve a recurrence rule at `reference`, honoring its expiry
    pub fn resolve_rule(&self, rule: &RecurrenceRule, reference: NaiveDate) -> PeriodResolution {
        let period = self.period_containing(rule, reference);

        match rule.expires_at {
            Some(expires_at) if expires_at < period.start => PeriodResolution::Expired {
                last_period: self.period_containing(rule, expires_at),
            },
            _ => PeriodResolution::Active(period),
        }
    }

    /// The period of `rule` that contains `reference`, ignoring expiry
    pub fn period_containing(&self, rule: &RecurrenceRule, reference: NaiveDate) -> DateRange {
        match rule.recurrence {
            Recurrence::Daily => DateRange::single_day(reference),
            Recurrence::Weekly => self.week_of(reference),
            Recurrence::Monthly => month_from_reset_day(rule.effective_reset_day(), reference),
            Recurrence::Yearly => year_from_anniversary(rule.anchor, reference),
        }
    }

    /// Calendar window for a dashboard granularity: today, the current
    /// week, the calendar month, or the calendar year
    pub fn reporting_window(&self, period: ReportingPeriod, reference: NaiveDate) -> DateRange {
        let jan_first = NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap_or(reference);
        let rule = RecurrenceRule {
            recurrence: period.recurrence(),
            reset_day: Some(1),
            anchor: jan_first,
            expires_at: None,
        };
        self.period_containing(&rule, reference)
    }

    fn week_of(&self, reference: NaiveDate) -> DateRange {
        let offset = (reference.weekday().num_days_from_monday() + 7
            - self.week_start.num_days_from_monday())
            % 7;
        let start = reference - Duration::days(offset as i64);
        DateRange {
            start,
            end: start + Duration::days(6),
        }
    }
}

/// Monthly period starting on `reset_day`, clamped to each month's length
fn month_from_reset_day(reset_day: u32, reference: NaiveDate) -> DateRange {
    let this_month = clamped_date(reference.year(), reference.month(), reset_day);
    let start = if this_month <= reference {
        this_month
    } else {
        let (year, month) = shift_month(reference.year(), reference.month(), -1);
        clamped_date(year, month, reset_day)
    };

    let (next_year, next_month) = shift_month(start.year(), start.month(), 1);
    let next_start = clamped_date(next_year, next_month, reset_day);

    DateRange {
        start,
        end: day_before(next_start),
    }
}

/// Yearly period starting on the anchor's month/day
fn year_from_anniversary(anchor: NaiveDate, reference: NaiveDate) -> DateRange {
    let this_year = clamped_date(reference.year(), anchor.month(), anchor.day());
    let start = if this_year <= reference {
        this_year
    } else {
        clamped_date(reference.year() - 1, anchor.month(), anchor.day())
    };
    let next_start = clamped_date(start.year() + 1, anchor.month(), anchor.day());

    DateRange {
        start,
        end: day_before(next_start),
    }
}
