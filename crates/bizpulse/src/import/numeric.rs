/// Parse an amount or rate as typed in French or English spreadsheets:
/// `1 234,5 €`, `1.234,5`, `1,234.5`, `450,000`, `12,5 %`.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, '€' | '%' | '$' | '\u{a0}' | '\u{202f}') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let commas = cleaned.matches(',').count();
    let dots = cleaned.matches('.').count();
    let canonical = match (commas, dots) {
        (0, 0) => cleaned,
        (_, 0) if commas > 1 => cleaned.replace(',', ""),
        (1, 0) if is_thousands_group(&cleaned, ',') => cleaned.replace(',', ""),
        (1, 0) => cleaned.replace(',', "."),
        (0, _) if dots > 1 => cleaned.replace('.', ""),
        (0, 1) => cleaned,
        _ => {
            let last_comma = cleaned.rfind(',')?;
            let last_dot = cleaned.rfind('.')?;
            if last_comma > last_dot {
                cleaned.replace('.', "").replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
    };

    canonical
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// `450,000` reads as an English thousands group: one to three leading
/// digits, not all zero, then exactly three digits.
fn is_thousands_group(value: &str, separator: char) -> bool {
    let Some((integer, group)) = value.split_once(separator) else {
        return false;
    };
    let integer = integer.trim_start_matches(['-', '+']);
    (1..=3).contains(&integer.len())
        && integer.chars().all(|c| c.is_ascii_digit())
        && !integer.trim_start_matches('0').is_empty()
        && group.len() == 3
        && group.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_and_english_notations() {
        assert_eq!(parse_number("1 234,5"), Some(1234.5));
        assert_eq!(parse_number("1\u{a0}234,5 €"), Some(1234.5));
        assert_eq!(parse_number("1.234,5"), Some(1234.5));
        assert_eq!(parse_number("1,234.5"), Some(1234.5));
        assert_eq!(parse_number("12,5 %"), Some(12.5));
        assert_eq!(parse_number("450000"), Some(450_000.0));
        assert_eq!(parse_number("1.250.000"), Some(1_250_000.0));
        assert_eq!(parse_number("-4,2"), Some(-4.2));
    }

    #[test]
    fn single_comma_with_three_digits_is_a_thousands_group() {
        assert_eq!(parse_number("450,000"), Some(450_000.0));
        assert_eq!(parse_number("12,500 €"), Some(12_500.0));
        assert_eq!(parse_number("-1,250"), Some(-1_250.0));
        assert_eq!(parse_number("0,125"), Some(0.125));
        assert_eq!(parse_number("64,50"), Some(64.5));
        assert_eq!(parse_number("7,2"), Some(7.2));
    }

    #[test]
    fn rejects_blank_and_text() {
        assert_eq!(parse_number("  "), None);
        assert_eq!(parse_number("€"), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("inf"), None);
    }
}
