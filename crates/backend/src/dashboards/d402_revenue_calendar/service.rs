use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d402_revenue_calendar::{
    CalendarCell, CalendarDayAggregate, CalendarKey, CalendarPolicy, HourlyBin, LeapDayPolicy,
};
use contracts::domain::a001_sales_record::SalesRecord;
use contracts::shared::filter::{FilterState, YearFilter};
use std::collections::BTreeMap;

#[derive(Default)]
struct DayAcc {
    total: f64,
    details: Vec<SalesRecord>,
}

impl DayAcc {
    fn add(&mut self, record: &SalesRecord) {
        self.total += record.revenue;
        self.details.push(record.clone());
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

fn passes_revenue_policy(record: &SalesRecord, policy: &CalendarPolicy) -> bool {
    !policy.exclude_negative_revenue || record.revenue >= 0.0
}

/// (month, day) slot of `date` in the reference calendar, `None` if dropped
fn reference_slot(date: NaiveDate, policy: &CalendarPolicy) -> Option<(u32, u32)> {
    let slot = (date.month(), date.day());
    if slot == (2, 29) && !is_leap_year(policy.reference_year) {
        return match policy.leap_day {
            LeapDayPolicy::FoldIntoFeb28 => Some((2, 28)),
            LeapDayPolicy::Drop => None,
        };
    }
    Some(slot)
}

/// Daily revenue for the heatmap.
///
/// For one year: cells keyed by exact date. For all years: cells keyed by
/// (month, day) and laid out on `policy.reference_year`. Output is ordered
/// by date; details keep input order.
pub fn aggregate_calendar(
    records: &[SalesRecord],
    filter: &FilterState,
    policy: &CalendarPolicy,
) -> Vec<CalendarDayAggregate> {
    let eligible = records
        .iter()
        .filter(|r| filter.matches(r) && passes_revenue_policy(r, policy));

    let result = match filter.year {
        YearFilter::Year(_) => {
            let mut days: BTreeMap<NaiveDate, DayAcc> = BTreeMap::new();
            for record in eligible {
                days.entry(record.date()).or_default().add(record);
            }
            days.into_iter()
                .map(|(date, acc)| CalendarDayAggregate {
                    key: CalendarKey::Date { date },
                    date,
                    total_revenue: acc.total,
                    order_count: acc.details.len(),
                    detail_records: acc.details,
                    is_aggregate: false,
                })
                .collect::<Vec<_>>()
        }
        YearFilter::All => {
            let mut slots: BTreeMap<(u32, u32), DayAcc> = BTreeMap::new();
            for record in eligible {
                if let Some(slot) = reference_slot(record.date(), policy) {
                    slots.entry(slot).or_default().add(record);
                }
            }
            slots
                .into_iter()
                .filter_map(|((month, day), acc)| {
                    let date = NaiveDate::from_ymd_opt(policy.reference_year, month, day)?;
                    Some(CalendarDayAggregate {
                        key: CalendarKey::MonthDay { month, day },
                        date,
                        total_revenue: acc.total,
                        order_count: acc.details.len(),
                        detail_records: acc.details,
                        is_aggregate: true,
                    })
                })
                .collect::<Vec<_>>()
        }
    };

    tracing::debug!(
        "aggregate_calendar: {} records -> {} days (year={})",
        records.len(),
        result.len(),
        filter.year
    );
    result
}

/// Revenue per hour of day (24 bins) for the sparkline of one cell.
pub fn hourly_revenue(details: &[SalesRecord]) -> Vec<HourlyBin> {
    let mut bins: Vec<HourlyBin> = (0..24).map(|hour| HourlyBin { hour, revenue: 0.0 }).collect();
    for record in details {
        if let Some(bin) = bins.get_mut(record.hour() as usize) {
            bin.revenue += record.revenue;
        }
    }
    bins
}

/// Grid position: weeks since the Monday on or before January 1, weekday Mon = 0.
pub fn calendar_cell(date: NaiveDate) -> CalendarCell {
    let monday_of = |d: NaiveDate| d - chrono::Duration::days(d.weekday().num_days_from_monday() as i64);
    let year_start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
    let weeks = (monday_of(date) - monday_of(year_start)).num_days() / 7;
    CalendarCell {
        week: weeks as u32,
        weekday: date.weekday().num_days_from_monday(),
    }
}

/// Upper bound of the colour scale, 0 for an empty calendar.
pub fn max_total(days: &[CalendarDayAggregate]) -> f64 {
    days.iter().map(|d| d.total_revenue).fold(0.0, f64::max)
}
