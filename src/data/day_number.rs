use chrono::NaiveDate;

/// Julian day number of 0001-01-01 in the proleptic Gregorian calendar,
/// i.e. the date chrono counts as day 1 from the Common Era.
const JDN_OF_CE_DAY_ONE: i32 = 1_721_426;

/// Convert a legacy Julian day number into a calendar date.
///
/// Out-of-range and nonsensical inputs yield `None` rather than an error;
/// callers coming from day-encoded integer payloads treat that as an empty
/// date.
pub fn date_from_day_number(day: i32) -> Option<NaiveDate> {
    let days_from_ce = day.checked_sub(JDN_OF_CE_DAY_ONE)?.checked_add(1)?;
    NaiveDate::from_num_days_from_ce_opt(days_from_ce)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_epoch_anchor() {
        assert_eq!(
            date_from_day_number(2_440_588),
            NaiveDate::from_ymd_opt(1970, 1, 1)
        );
    }

    #[test]
    fn test_mid_nineties_day_number() {
        assert_eq!(
            date_from_day_number(2_450_000),
            NaiveDate::from_ymd_opt(1995, 10, 9)
        );
    }

    #[test]
    fn test_out_of_range_is_empty() {
        assert_eq!(date_from_day_number(i32::MAX), None);
        assert_eq!(date_from_day_number(i32::MIN), None);
    }
}
