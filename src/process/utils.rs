/// Trim whitespace and strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse a survey number. Accepts a decimal comma (`"3,5"`) when no dot is
/// present; rejects NaN and infinities.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = clean_str(s);
    if s.is_empty() {
        return None;
    }
    let v: f64 = if s.contains(',') && !s.contains('.') {
        s.replace(',', ".").parse().ok()?
    } else {
        s.parse().ok()?
    };
    v.is_finite().then_some(v)
}

/// Like [`parse_number`], but a single trailing `%` is allowed.
pub fn parse_percent(s: &str) -> Option<f64> {
    let s = clean_str(s);
    parse_number(s.strip_suffix('%').unwrap_or(&s))
}

/// Parse a whole number; integral floats (`"3.0"`, `"3,0"`) are accepted.
/// Plain integers are parsed exactly, so values above 2^53 keep every digit.
pub fn parse_integer(s: &str) -> Option<i64> {
    let cleaned = clean_str(s);
    if let Ok(v) = cleaned.parse::<i64>() {
        return Some(v);
    }
    let v = parse_number(&cleaned)?;
    if v.fract() != 0.0 || v < i64::MIN as f64 || v > i64::MAX as f64 {
        return None;
    }
    Some(v as i64)
}

/// Strip a leading UTF-8 byte-order mark.
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{feff}').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_quotes_and_padding() {
        assert_eq!(clean_str("  \" hola \" "), "hola");
        assert_eq!(clean_str("\""), "\"");
        assert_eq!(clean_str(" 12 "), "12");
    }

    #[test]
    fn numbers_accept_decimal_comma() {
        assert_eq!(parse_number("3,5"), Some(3.5));
        assert_eq!(parse_number(" 12.25 "), Some(12.25));
        assert_eq!(parse_number("1,2.3"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("doce"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn percent_allows_trailing_sign() {
        assert_eq!(parse_percent("45%"), Some(45.0));
        assert_eq!(parse_percent("12,5 %"), Some(12.5));
        assert_eq!(parse_percent("%"), None);
    }

    #[test]
    fn integers_must_be_integral() {
        assert_eq!(parse_integer("3"), Some(3));
        assert_eq!(parse_integer("3.0"), Some(3));
        assert_eq!(parse_integer("3,0"), Some(3));
        assert_eq!(parse_integer("-4"), Some(-4));
        assert_eq!(parse_integer("2.5"), None);
    }

    #[test]
    fn large_integers_keep_full_precision() {
        assert_eq!(parse_integer("9007199254740993"), Some(9_007_199_254_740_993));
        assert_eq!(parse_integer(" 9223372036854775807 "), Some(i64::MAX));
        assert_ne!(parse_integer("9007199254740993"), parse_integer("9007199254740992"));
    }

    #[test]
    fn bom_is_stripped_once() {
        assert_eq!(strip_bom("\u{feff}id"), "id");
        assert_eq!(strip_bom("id"), "id");
    }
}
