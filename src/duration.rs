//! Human-readable durations ("1hr 5m 0s").

/// Units from largest to smallest. A unit's size in seconds is the product
/// of its factor and the factors of every smaller unit.
const UNITS: [(u64, &str); 3] = [(60, "hr"), (60, "m"), (1, "s")];

/// Format a whole number of seconds.
///
/// Leading zero units are dropped; once a unit has been written every
/// smaller unit follows. Zero seconds formats as `"0s"`.
pub fn format_duration(seconds: u64) -> String {
    let mut out = String::new();
    let mut remaining = seconds;

    for (index, (_, suffix)) in UNITS.iter().enumerate() {
        let size: u64 = UNITS[index..].iter().map(|(factor, _)| factor).product();
        let value = remaining / size;
        remaining %= size;

        let last = index + 1 == UNITS.len();
        if value > 0 || !out.is_empty() || last {
            out.push_str(&format!("{}{} ", value, suffix));
        }
    }

    out.trim_end().to_string()
}
