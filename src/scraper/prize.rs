use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Sponsor packages whose posted prize text does not carry a usable dollar
/// figure, with the value each package is counted at.
///
/// Checked in order and the first match wins, so a short pattern listed
/// early shadows longer combinations listed after it that also match.
const PACKAGE_VALUES: &[(&str, f64)] = &[
    (r"skeeter\s*sx190.*yamaha\s*150", 22900.0),
    (r"skeeter\s*sx200.*yamaha\s*200", 21000.0),
    (r"skeeter\s*sx190.*yamaha\s*150.*\$1000.*big\s*bass", 23900.0),
    (r"skeeter\s*sx190.*yamaha\s*150.*\$5000.*bonus", 27900.0),
    (
        r"skeeter\s*sx190.*yamaha\s*150.*\$5000.*bonus.*\$1000.*big\s*bass",
        28900.0,
    ),
    (r"skeeter\s*sx200.*\$1000.*big\s*bass", 22000.0),
    (r"skeeter\s*sx200.*\$5000.*bonus", 26000.0),
    (r"skeeter\s*sx200.*\$5000.*bonus.*\$1000.*big\s*bass", 27000.0),
    (r"\$2750.*\$5000.*bonus", 7750.0),
    (r"yamaha150.*real money.*\$300.*big\s*bass", 24200.0),
    (
        r"skeeter\s*zx\s*20.*yamaha\s*225.*sho.*\$200.*sure[-\s]*life",
        35000.0,
    ),
];

static PACKAGES: LazyLock<Vec<(Regex, f64)>> = LazyLock::new(|| {
    PACKAGE_VALUES
        .iter()
        .map(|(pattern, value)| {
            let re = Regex::new(&format!("(?i){pattern}")).expect("package pattern is valid");
            (re, *value)
        })
        .collect()
});

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?([0-9][0-9,]*(?:\.[0-9]{2})?)").expect("amount pattern is valid")
});

/// Turn a prize cell's text into a dollar amount.
///
/// Known sponsor packages map to fixed values; otherwise the first
/// currency-like number is used. Text without any number is worth nothing.
pub fn normalize_prize(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    if let Some((re, value)) = PACKAGES.iter().find(|(re, _)| re.is_match(text)) {
        debug!(pattern = re.as_str(), value, "matched prize package");
        return *value;
    }

    AMOUNT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
        .unwrap_or(0.0)
}
