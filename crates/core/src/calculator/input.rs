/// Parse free-text quantity input the way a numeric form field does.
///
/// Takes the leading integer prefix (`"12abc"` → 12). Negative, blank or
/// non-numeric input yields 0 and oversized values saturate at `u32::MAX`.
pub fn parse_quantity(input: &str) -> u32 {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if negative || digits == 0 {
        return 0;
    }

    rest[..digits].bytes().fold(0_u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    })
}
