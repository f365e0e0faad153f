//! Форматирование сумм в VND

/// Разделитель тысяч для vi-VN
const THOUSANDS_SEPARATOR: char = '.';

/// Вставляет разделитель каждые 3 цифры с конца
pub fn format_thousands(value: i64, separator: char) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut result = String::new();

    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(c);
    }
    if value < 0 {
        result.push('-');
    }

    result.chars().rev().collect()
}

/// Сумма в донгах без дробной части: "21.990.000 ₫"
pub fn format_vnd(amount: i64) -> String {
    format!("{}\u{00a0}₫", format_thousands(amount, THOUSANDS_SEPARATOR))
}

/// Подпись оси графика в миллионах: "45M₫"
pub fn format_millions(value: f64) -> String {
    format!("{:.0}M₫", value / 1_000_000.0)
}

/// Компактное число для карточек: 1248 -> "1.248"
pub fn format_count(value: u64) -> String {
    format_thousands(value.min(i64::MAX as u64) as i64, THOUSANDS_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0, '.'), "0");
        assert_eq!(format_thousands(999, '.'), "999");
        assert_eq!(format_thousands(1000, '.'), "1.000");
        assert_eq!(format_thousands(21_990_000, '.'), "21.990.000");
        assert_eq!(format_thousands(-1_234_567, ' '), "-1 234 567");
    }

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(5_990_000), "5.990.000\u{00a0}₫");
        assert_eq!(format_vnd(0), "0\u{00a0}₫");
    }

    #[test]
    fn test_format_millions() {
        assert_eq!(format_millions(45_000_000.0), "45M₫");
        assert_eq!(format_millions(88_400_000.0), "88M₫");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1248), "1.248");
        assert_eq!(format_count(123), "123");
    }
}
