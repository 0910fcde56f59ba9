//! Display helpers for the one supported locale (pt-BR, BRL).

/// Format a number with `.` thousands separators and a `,` decimal mark.
///
/// # Examples
///
/// ```
/// use sales_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1.234,5");
/// assert_eq!(format_number(1234567.0, 0), "1.234.567");
/// assert_eq!(format_number(0.0, 2), "0,00");
/// assert_eq!(format_number(-9876.5, 1), "-9.876,5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge exact midpoints up before rounding (1.005 → 1.01).
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let fixed = format!("{:.prec$}", rounded, prec = decimals as usize);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut result = group_thousands(int_part);
    if let Some(frac) = frac_part {
        result.push(',');
        result.push_str(frac);
    }

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount in BRL.
///
/// # Examples
///
/// ```
/// use sales_core::formatting::format_brl;
///
/// assert_eq!(format_brl(1234.56), "R$ 1.234,56");
/// assert_eq!(format_brl(0.0), "R$ 0,00");
/// assert_eq!(format_brl(-9.99), "-R$ 9,99");
/// ```
pub fn format_brl(amount: f64) -> String {
    if amount < 0.0 {
        format!("-R$ {}", format_number(amount.abs(), 2))
    } else {
        format!("R$ {}", format_number(amount, 2))
    }
}

/// Format a percentage with one decimal place and a `,` decimal mark.
///
/// ```
/// use sales_core::formatting::format_percent;
///
/// assert_eq!(format_percent(2.7548), "2,8%");
/// ```
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value, 1))
}

/// Insert `.` every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push('.');
        }
        result.push(c);
    }
    result
}
