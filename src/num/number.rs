use serde_json::Number;

/// Renders a JSON number as dump text: integers in decimal, floats in their
/// shortest round-trip form.
pub fn format_json_number(number: &Number) -> String {
    if let Some(value) = number.as_i64() {
        let mut buffer = itoa::Buffer::new();
        return buffer.format(value).to_string();
    }
    if let Some(value) = number.as_u64() {
        let mut buffer = itoa::Buffer::new();
        return buffer.format(value).to_string();
    }
    match number.as_f64() {
        Some(value) => format_f64(value),
        None => number.to_string(),
    }
}

pub fn format_f64(value: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    buffer.format(value).to_string()
}

pub fn is_integer(number: &Number) -> bool {
    number.is_i64() || number.is_u64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_integers_and_floats() {
        assert_eq!(format_json_number(&Number::from(-4)), "-4");
        assert_eq!(format_json_number(&Number::from(u64::MAX)), "18446744073709551615");
        let half = Number::from_f64(0.5).unwrap();
        assert_eq!(format_json_number(&half), "0.5");
        assert!(!is_integer(&half));
        assert_eq!(format_f64(3.0), "3.0");
        assert_eq!(format_f64(1e21), "1e21");
    }
}
