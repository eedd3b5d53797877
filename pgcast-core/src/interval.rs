use std::ops::{Add, Neg, Sub};

const SECS_IN_DAY: i64 = 60 * 60 * 24;
const MICROS_IN_SEC: i128 = 1_000_000;
const MICROS_IN_DAY: i128 = SECS_IN_DAY as i128 * MICROS_IN_SEC;

/// Signed duration made of days, seconds and microseconds.
///
/// The representation is normalized: `0 <= seconds < 86400` and
/// `0 <= micros < 1_000_000`, the sign is carried by `days`. So `-1 second` is
/// stored as `-1 day, 86399 seconds`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    days: i64,
    seconds: i64,
    micros: i64,
}

impl Interval {
    pub const ZERO: Interval = Interval {
        days: 0,
        seconds: 0,
        micros: 0,
    };
    /// Days counted for one month when reading server intervals.
    pub const DAYS_IN_MONTH: i64 = 30;
    /// Days counted for one year when reading server intervals.
    pub const DAYS_IN_YEAR: i64 = 365;

    pub const fn new(days: i64, seconds: i64, micros: i64) -> Self {
        Self::from_micros(
            days as i128 * MICROS_IN_DAY + seconds as i128 * MICROS_IN_SEC + micros as i128,
        )
    }

    /// Like [`Interval::new`], `None` when the normalized days do not fit in `i64`.
    pub const fn checked_new(days: i64, seconds: i64, micros: i64) -> Option<Self> {
        let total =
            days as i128 * MICROS_IN_DAY + seconds as i128 * MICROS_IN_SEC + micros as i128;
        let days = total.div_euclid(MICROS_IN_DAY);
        if days < i64::MIN as i128 || days > i64::MAX as i128 {
            return None;
        }
        Some(Self::from_micros(total))
    }

    pub const fn from_micros(micros: i128) -> Self {
        let days = micros.div_euclid(MICROS_IN_DAY);
        let rest = micros.rem_euclid(MICROS_IN_DAY);
        Self {
            days: days as _,
            seconds: (rest / MICROS_IN_SEC) as _,
            micros: (rest % MICROS_IN_SEC) as _,
        }
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self::new(0, secs, 0)
    }

    pub const fn from_days(days: i64) -> Self {
        Self::new(days, 0, 0)
    }

    pub const fn from_months(months: i64) -> Self {
        Self::new(months * Self::DAYS_IN_MONTH, 0, 0)
    }

    pub const fn from_years(years: i64) -> Self {
        Self::new(years * Self::DAYS_IN_YEAR, 0, 0)
    }

    pub const fn days(&self) -> i64 {
        self.days
    }

    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    pub const fn micros(&self) -> i64 {
        self.micros
    }

    pub const fn total_micros(&self) -> i128 {
        self.days as i128 * MICROS_IN_DAY
            + self.seconds as i128 * MICROS_IN_SEC
            + self.micros as i128
    }

    pub const fn is_zero(&self) -> bool {
        self.days == 0 && self.seconds == 0 && self.micros == 0
    }

    pub const fn as_duration(&self) -> time::Duration {
        let micros = self.total_micros();
        time::Duration::new(
            (micros / MICROS_IN_SEC) as i64,
            ((micros % MICROS_IN_SEC) * 1_000) as i32,
        )
    }
}

impl Add for Interval {
    type Output = Interval;
    fn add(self, rhs: Self) -> Self::Output {
        Interval::from_micros(self.total_micros() + rhs.total_micros())
    }
}

impl Sub for Interval {
    type Output = Interval;
    fn sub(self, rhs: Self) -> Self::Output {
        Interval::from_micros(self.total_micros() - rhs.total_micros())
    }
}

impl Neg for Interval {
    type Output = Interval;
    fn neg(self) -> Self::Output {
        Interval::from_micros(-self.total_micros())
    }
}

impl From<Interval> for time::Duration {
    fn from(value: Interval) -> Self {
        value.as_duration()
    }
}

impl From<time::Duration> for Interval {
    fn from(value: time::Duration) -> Self {
        Interval::from_micros(value.whole_microseconds())
    }
}
