//! Unit-scaling helpers used by the pretty report.
use std::num::FpCategory;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;
const BILLION: f64 = 1_000_000_000.0;

/// Numeric input accepted by the formatting helpers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Number {
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Uint(value) => value as f64,
            Number::Float(value) => value,
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(i64::from(value))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Uint(u64::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::Uint(value)
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Number::Uint(u64::try_from(value).unwrap_or(u64::MAX))
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Seconds scaled to ns, us, ms, or s.
#[must_use]
pub fn short_time(value: impl Into<Number>) -> String {
    let seconds = value.into().as_f64();
    if seconds < 0.000_000_001 {
        format!("{:.0}", seconds)
    } else if seconds < 0.000_001 {
        format!("{:.1}ns", seconds * BILLION)
    } else if seconds < 0.001 {
        format!("{:.1}us", seconds * MILLION)
    } else if seconds < 1.0 {
        format!("{:.1}ms", seconds * THOUSAND)
    } else {
        format!("{:.2}s", seconds)
    }
}

/// Bytes scaled by powers of 1024, without decimals.
#[must_use]
pub fn short_byte_int(value: impl Into<Number>) -> String {
    let bytes = value.into().as_f64();
    if bytes >= GIB {
        format!("{:.0}G", bytes / GIB)
    } else if bytes >= MIB {
        format!("{:.0}M", bytes / MIB)
    } else if bytes >= KIB {
        format!("{:.0}k", bytes / KIB)
    } else {
        format!("{:.0}", bytes)
    }
}

/// Bytes scaled by powers of 1024, with two decimals; zero prints as `0`.
#[must_use]
pub fn short_byte(value: impl Into<Number>) -> String {
    let bytes = value.into().as_f64();
    if bytes >= GIB {
        format!("{:.2}G", bytes / GIB)
    } else if bytes >= MIB {
        format!("{:.2}M", bytes / MIB)
    } else if bytes >= KIB {
        format!("{:.2}k", bytes / KIB)
    } else if is_zero(bytes) {
        "0".to_owned()
    } else {
        format!("{:.2}", bytes)
    }
}

/// Counts scaled by powers of 1000; small counts print without decimals.
#[must_use]
pub fn short_int(value: impl Into<Number>) -> String {
    let count = value.into().as_f64();
    if count >= BILLION {
        format!("{:.2}G", count / BILLION)
    } else if count >= MILLION {
        format!("{:.2}M", count / MILLION)
    } else if count >= THOUSAND {
        format!("{:.2}k", count / THOUSAND)
    } else {
        format!("{:.0}", count)
    }
}

/// Values scaled by powers of 1000 with two decimals; zero prints as `0`.
#[must_use]
pub fn short(value: impl Into<Number>) -> String {
    let number = value.into().as_f64();
    if number >= BILLION {
        format!("{:.2}G", number / BILLION)
    } else if number >= MILLION {
        format!("{:.2}M", number / MILLION)
    } else if number >= THOUSAND {
        format!("{:.2}k", number / THOUSAND)
    } else if is_zero(number) {
        "0".to_owned()
    } else {
        format!("{:.2}", number)
    }
}

/// `a / b * 100`, or zero when `b` is zero.
#[must_use]
pub fn percent(a: impl Into<Number>, b: impl Into<Number>) -> f64 {
    per(a, b) * 100.0
}

/// `a / b`, or zero when `b` is zero.
#[must_use]
pub fn per(a: impl Into<Number>, b: impl Into<Number>) -> f64 {
    let numerator = a.into().as_f64();
    let denominator = b.into().as_f64();
    if is_zero(denominator) {
        tracing::warn!("Division by zero in report helper; using 0");
        return 0.0;
    }
    numerator / denominator
}

fn is_zero(value: f64) -> bool {
    value.classify() == FpCategory::Zero
}
