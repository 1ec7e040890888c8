//! String formatting helpers

use console::style;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SEPARATED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_](\w)").expect("valid camel-case regex"));

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `foo-bar_baz` → `fooBarBaz`.
pub fn camel_case(input: &str) -> String {
    SEPARATED_WORD
        .replace_all(input, |caps: &Captures<'_>| caps[1].to_uppercase())
        .into_owned()
}

/// Human-readable build duration, e.g. `0.42 s` or `1.50 m` (number in bold).
pub fn pretty_time(seconds: f64) -> String {
    if seconds < 10.0 {
        let number =
            if seconds >= 0.01 { format!("{seconds:.2}") } else { format!("{seconds:.3}") };
        return format!("{} s", style(number).bold());
    }

    if seconds < 60.0 {
        return format!("{} s", style(format!("{seconds:.1}")).bold());
    }

    let minutes = seconds / 60.0;
    format!("{} m", style(format!("{minutes:.2}")).bold())
}
