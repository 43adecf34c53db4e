use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::burndown::DailyTotals;
use crate::domain::snapshot::NormalizedRecord;

/// Sums original and remaining minutes per snapshot date.
///
/// The result holds one entry per distinct date, ordered ascending. Records
/// from different files that share a date land in the same entry.
pub fn aggregate_daily_totals(records: &[NormalizedRecord]) -> Vec<DailyTotals> {
    let mut by_date: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for record in records {
        let entry = by_date.entry(record.snapshot_date).or_insert((0, 0));
        entry.0 += u64::from(record.original_minutes);
        entry.1 += u64::from(record.remaining_minutes);
    }

    by_date
        .into_iter()
        .map(|(date, (total_minutes, remaining_minutes))| DailyTotals {
            date,
            total_minutes,
            remaining_minutes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_record, on_date};

    #[test]
    fn sums_rows_per_date_in_ascending_order() {
        let records = vec![
            build_record(on_date(2026, 2, 9), 60, 30),
            build_record(on_date(2026, 2, 2), 120, 120),
            build_record(on_date(2026, 2, 9), 45, 15),
            build_record(on_date(2026, 2, 2), 30, 0),
        ];

        let totals = aggregate_daily_totals(&records);

        assert_eq!(
            totals,
            vec![
                DailyTotals {
                    date: on_date(2026, 2, 2),
                    total_minutes: 150,
                    remaining_minutes: 120,
                },
                DailyTotals {
                    date: on_date(2026, 2, 9),
                    total_minutes: 105,
                    remaining_minutes: 45,
                },
            ]
        );
    }

    #[test]
    fn dates_are_strictly_increasing_and_unique() {
        let base = on_date(2026, 1, 1);
        let records: Vec<_> = (0..40)
            .map(|idx| build_record(base + chrono::Duration::days(idx % 7), 10, 5))
            .collect();

        let totals = aggregate_daily_totals(&records);

        assert_eq!(totals.len(), 7);
        assert!(totals.windows(2).all(|pair| pair[0].date < pair[1].date));
        let total: u64 = totals.iter().map(|t| t.total_minutes).sum();
        assert_eq!(total, 400);
    }

    #[test]
    fn reaggregating_totals_returns_the_same_series() {
        let records = vec![
            build_record(on_date(2026, 3, 1), 600, 500),
            build_record(on_date(2026, 3, 1), 60, 0),
            build_record(on_date(2026, 3, 8), 660, 300),
        ];
        let totals = aggregate_daily_totals(&records);

        let degenerate: Vec<NormalizedRecord> = totals
            .iter()
            .map(|t| {
                build_record(
                    t.date,
                    t.total_minutes as u32,
                    t.remaining_minutes as u32,
                )
            })
            .collect();

        assert_eq!(aggregate_daily_totals(&degenerate), totals);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(aggregate_daily_totals(&[]).is_empty());
    }
}
