//! Sample cell values written by every routine.

use std::fmt;

/// A single value written into a benchmark cell.
///
/// The set deliberately mixes the scalar kinds spreadsheet writers treat differently: integers
/// and floats go through number formatting, text through the shared-strings table (for xlsx),
/// and `Null` exercises whatever a library does with an empty cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleValue {
    Integer(i64),
    Null,
    Text(&'static str),
    Float(f64),
}

/// Values written to consecutive rows; row `r` receives `SAMPLE_VALUES[r % 4]`.
pub const SAMPLE_VALUES: [SampleValue; 4] = [
    SampleValue::Integer(1),
    SampleValue::Null,
    SampleValue::Text("foobar"),
    SampleValue::Float(2.32),
];

/// Endless iterator over [`SAMPLE_VALUES`], starting at the first value.
///
/// Each caller gets its own cursor, so two invocations of the same routine write identical
/// content no matter what ran before them.
pub fn sample_cycle() -> impl Iterator<Item = SampleValue> {
    SAMPLE_VALUES.into_iter().cycle()
}

/// Text rendering used by text-only writers (CSV, stringified rows). `Null` renders empty.
impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleValue::Integer(n) => write!(f, "{n}"),
            SampleValue::Null => Ok(()),
            SampleValue::Text(s) => f.write_str(s),
            SampleValue::Float(n) => write!(f, "{n}"),
        }
    }
}
