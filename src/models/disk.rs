use crate::util::text::{quote, trim_report_start};
use serde::{Serialize, Serializer};
use std::fmt;

/// Usage value read from a report line.
///
/// `NaN` stands in for a usage field with no leading integer. Such records
/// are still accepted if their mount point passes the filters. Digit runs
/// too long for an i64 keep their magnitude as a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Usage {
    Value(i64),
    Large(f64),
    NaN,
}

impl Usage {
    /// Loose leading-integer parse: optional whitespace, optional sign, then
    /// decimal digits up to the first non-digit. "42%" is 42, "abc" is NaN.
    pub fn parse_loose(s: &str) -> Self {
        let s = trim_report_start(s);
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true,  &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _          => (false, s),
        };
        let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let digits = &rest[..end];
        if digits.is_empty() { return Usage::NaN; }

        let signed = if negative { format!("-{}", digits) } else { digits.to_string() };
        match signed.parse::<i64>() {
            Ok(v)  => Usage::Value(v),
            Err(_) => signed.parse::<f64>().map(Usage::Large).unwrap_or(Usage::NaN),
        }
    }

    pub fn is_nan(&self) -> bool { matches!(self, Usage::NaN) }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Usage::Value(v) => write!(f, "{}", v),
            // Plain digits below 1e21, exponent form ("1e+21") from there on
            Usage::Large(v) if v.abs() < 1e21 => write!(f, "{}", v),
            Usage::Large(v) => {
                let e = format!("{:e}", v);
                match e.split_once('e') {
                    Some((m, exp)) if !exp.starts_with('-') => write!(f, "{}e+{}", m, exp),
                    _ => f.write_str(&e),
                }
            }
            Usage::NaN      => f.write_str("NaN"),
        }
    }
}

// JSON has no NaN; emit null instead.
impl Serialize for Usage {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Usage::Value(v) => s.serialize_i64(*v),
            Usage::Large(v) => s.serialize_f64(*v),
            Usage::NaN      => s.serialize_none(),
        }
    }
}

/// One entry of the disk model handed to the dashboard widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskUsageRecord {
    pub mount_point: String,
    pub usage:       Usage,
    pub color:       String,
}

impl fmt::Display for DiskUsageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ mountPoint: {}, usage: {}, color: {} }}",
            quote(&self.mount_point), self.usage, quote(&self.color)
        )
    }
}
