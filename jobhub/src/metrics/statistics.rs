use chrono::NaiveDate;

use crate::types::statistics::{AdminStatistics, DailyStat};

/// Days shown in the daily claims table.
pub const RECENT_STAT_DAYS: usize = 10;

/// The last `days` entries of the daily stats, in server order.
pub fn recent_stats(statistics: &AdminStatistics, days: usize) -> &[DailyStat] {
    let stats = statistics.stats.as_slice();
    &stats[stats.len().saturating_sub(days)..]
}

/// `claims` relative to the busiest day, in percent. Zero when no day has claims.
pub fn claim_percentage(statistics: &AdminStatistics, claims: u64) -> f64 {
    let max_claims = statistics.stats.iter().map(|s| s.claimed).max().unwrap_or(0);
    if max_claims == 0 {
        0.0
    } else {
        claims as f64 / max_claims as f64 * 100.0
    }
}

/// Parses a `yy-mm-dd` stat date (years are in the 2000s).
pub fn parse_stat_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

/// `"25-08-27"` -> `"Aug 27"`. Unparseable dates are returned as is.
pub fn format_stat_date(value: &str) -> String {
    match parse_stat_date(value) {
        Some(date) => date.format("%b %-d").to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statistics(claims: &[u64]) -> AdminStatistics {
        AdminStatistics {
            stats: claims
                .iter()
                .enumerate()
                .map(|(i, claimed)| DailyStat { date: format!("25-08-{:02}", i + 1), claimed: *claimed })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn recent_stats_keeps_the_tail() {
        let stats = statistics(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        let recent = recent_stats(&stats, RECENT_STAT_DAYS);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].claimed, 3);
        assert_eq!(recent_stats(&statistics(&[1]), 10).len(), 1);
    }

    #[test]
    fn claim_percentage_is_relative_to_busiest_day() {
        let stats = statistics(&[2, 8, 4]);
        assert_eq!(claim_percentage(&stats, 4), 50.0);
        assert_eq!(claim_percentage(&statistics(&[0, 0]), 0), 0.0);
        assert_eq!(claim_percentage(&AdminStatistics::default(), 3), 0.0);
    }

    #[test]
    fn stat_dates_use_two_digit_years() {
        assert_eq!(parse_stat_date("25-08-27"), NaiveDate::from_ymd_opt(2025, 8, 27));
        assert_eq!(format_stat_date("25-08-07"), "Aug 7");
        assert_eq!(parse_stat_date("25-13-01"), None);
        assert_eq!(format_stat_date("yesterday"), "yesterday");
    }
}
