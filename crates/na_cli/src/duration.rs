use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A duration written like `10s`, `30m` or `1h15m`. Bare numbers are seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            return s
                .parse::<u64>()
                .map(|secs| HumanDuration(Duration::from_secs(secs)))
                .map_err(|e| format!("Invalid number in duration '{}': {}", s, e));
        }

        humantime::parse_duration(s)
            .map(HumanDuration)
            .map_err(|e| format!("Invalid duration '{}': {}", s, e))
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", humantime::format_duration(self.0))
    }
}
