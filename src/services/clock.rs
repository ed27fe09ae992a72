use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};

/// Source of "now" for date checks and timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// UTC offset of the business; calendar checks happen in local time
    fn offset(&self) -> FixedOffset {
        Utc.fix()
    }

    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.offset()).date_naive()
    }
}

/// Offset from a minute count, `None` when out of range
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Clock pinned to a single instant
pub struct FixedClock {
    instant: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    /// Midday UTC on the given date
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        Self::at(
            Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
                .single()
                .unwrap_or_else(Utc::now),
        )
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            offset: Utc.fix(),
        }
    }

    pub fn in_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock::on(2026, 1, 1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_today_follows_business_offset() {
        let late_evening_utc = Utc.with_ymd_and_hms(2026, 1, 1, 20, 30, 0).unwrap();
        let dhaka = offset_from_minutes(360).unwrap();

        assert_eq!(
            FixedClock::at(late_evening_utc).today(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
        assert_eq!(
            FixedClock::at(late_evening_utc).in_offset(dhaka).today(),
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(offset_from_minutes(24 * 60).is_none());
        assert_eq!(offset_from_minutes(-300).unwrap().local_minus_utc(), -5 * 3600);
        assert_eq!(SystemClock::utc().offset().local_minus_utc(), 0);
    }
}
