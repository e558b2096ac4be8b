//! nl-NL 표기 (천 단위 점, 소수점 쉼표).

/// 소수 `decimals`자리의 nl-NL 숫자 표기.
pub fn number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// 유로 금액 (`€ 1.234,56`).
pub fn currency(value: f64) -> String {
    format!("€ {}", number(value, 2))
}

/// 퍼센트 (`12,5%`).
pub fn percentage(value: f64, decimals: usize) -> String {
    format!("{}%", number(value, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(number(1_234_567.0, 0), "1.234.567");
        assert_eq!(number(999.0, 0), "999");
        assert_eq!(number(1000.5, 1), "1.000,5");
    }

    #[test]
    fn currency_and_percentage() {
        assert_eq!(currency(1234.5), "€ 1.234,50");
        assert_eq!(currency(-12.0), "€ -12,00");
        assert_eq!(percentage(12.345, 1), "12,3%");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(number(-0.001, 2), "0,00");
    }
}
