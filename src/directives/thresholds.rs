//! Memory utilisation thresholds: `high=<n> low=<n>` in either order.

fn threshold_value(raw: &str) -> Option<u8> {
    if raw.is_empty() || raw.starts_with('0') || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u8>().ok().filter(|v| (1..=100).contains(v))
}

/// Report whether `s` holds exactly one `high` and one `low`, separated by a
/// single space, with `1 <= low < high <= 100`.
pub fn verify_app_protect_thresholds(s: &str) -> bool {
    let mut high = None;
    let mut low = None;

    let tokens: Vec<&str> = s.split(' ').collect();
    if tokens.len() != 2 {
        return false;
    }

    for token in tokens {
        let Some((key, raw)) = token.split_once('=') else {
            return false;
        };
        let Some(value) = threshold_value(raw) else {
            return false;
        };
        let slot = match key {
            "high" => &mut high,
            "low" => &mut low,
            _ => return false,
        };
        if slot.replace(value).is_some() {
            return false;
        }
    }

    matches!((low, high), (Some(low), Some(high)) if low < high)
}
