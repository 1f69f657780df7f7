use super::{DEFAULT_WIDTH, MAX_WIDTH_RATIO};

/// Largest width the panel may take for the given viewport.
///
/// Without an observable viewport the bound falls back to twice the built-in
/// default width.
pub fn max_width_for(viewport_width: Option<u32>) -> u32 {
    match viewport_width {
        Some(width) => (f64::from(width) * MAX_WIDTH_RATIO).floor() as u32,
        None => DEFAULT_WIDTH.saturating_mul(2),
    }
}

/// Clamps `candidate` into `min..=max`.
///
/// Total for every input: when the viewport is too small for `min`, the
/// maximum wins.
pub fn clamp_width(candidate: i64, min: u32, max: u32) -> u32 {
    let clamped = candidate.max(i64::from(min)).min(i64::from(max));
    u32::try_from(clamped).unwrap_or(0)
}

/// Parses a stored width and accepts it only when it lies inside
/// `min..=max`.
///
/// Reads the leading integer and ignores whatever follows it, so `"500px"`
/// and `"500.7"` both yield 500.
pub fn parse_stored_width(raw: &str, min: u32, max: u32) -> Option<u32> {
    let parsed = leading_integer(raw)?;
    if parsed < i64::from(min) || parsed > i64::from(max) {
        return None;
    }
    u32::try_from(parsed).ok()
}

fn leading_integer(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }

    // Runs too long for i64 are far outside any width range.
    let magnitude = unsigned[..digits_len].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_width_is_floor_of_eighty_five_percent() {
        assert_eq!(max_width_for(Some(1000)), 850);
        assert_eq!(max_width_for(Some(1001)), 850);
        assert_eq!(max_width_for(Some(1412)), 1200);
        assert_eq!(max_width_for(Some(0)), 0);
    }

    #[test]
    fn max_width_without_viewport_is_twice_default() {
        assert_eq!(max_width_for(None), 1600);
    }

    #[test]
    fn clamp_is_identity_inside_bounds() {
        for candidate in [400_i64, 401, 650, 849, 850] {
            assert_eq!(clamp_width(candidate, 400, 850) as i64, candidate);
        }
    }

    #[test]
    fn clamp_saturates_outside_bounds() {
        assert_eq!(clamp_width(-50, 400, 850), 400);
        assert_eq!(clamp_width(399, 400, 850), 400);
        assert_eq!(clamp_width(851, 400, 850), 850);
        assert_eq!(clamp_width(i64::MAX, 400, 850), 850);
    }

    #[test]
    fn clamp_prefers_max_when_bounds_cross() {
        assert_eq!(clamp_width(500, 400, 300), 300);
        assert_eq!(clamp_width(100, 400, 300), 300);
    }

    #[test]
    fn parse_stored_width_checks_range() {
        assert_eq!(parse_stored_width("500", 400, 1200), Some(500));
        assert_eq!(parse_stored_width(" 400\n", 400, 1200), Some(400));
        assert_eq!(parse_stored_width("1200", 400, 1200), Some(1200));
        assert_eq!(parse_stored_width("999999", 400, 1200), None);
        assert_eq!(parse_stored_width("399", 400, 1200), None);
        assert_eq!(parse_stored_width("-5", 400, 1200), None);
        assert_eq!(parse_stored_width("wide", 400, 1200), None);
        assert_eq!(parse_stored_width("", 400, 1200), None);
    }

    #[test]
    fn parse_stored_width_reads_leading_integer() {
        assert_eq!(parse_stored_width("500px", 400, 1200), Some(500));
        assert_eq!(parse_stored_width("500.7", 400, 1200), Some(500));
        assert_eq!(parse_stored_width("  500 wide", 400, 1200), Some(500));
        assert_eq!(parse_stored_width("+640", 400, 1200), Some(640));
        assert_eq!(parse_stored_width("px500", 400, 1200), None);
        assert_eq!(parse_stored_width("-", 400, 1200), None);
        assert_eq!(parse_stored_width("-500px", 400, 1200), None);
        assert_eq!(parse_stored_width("99999999999999999999999", 400, 1200), None);
    }
}
