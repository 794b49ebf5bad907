/// Truncate a string to a maximum number of characters, adding ellipsis if
/// needed. Counts chars, not bytes, so Hebrew text is never split mid-glyph.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Starting price label, e.g. `החל מ-$1,800`
pub fn format_price(price: f64) -> String {
    let whole = price.max(0.0).round() as u64;
    let digits = whole.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("החל מ-${}", grouped)
}

/// Filled stars up to the rating, hollow stars up to five
pub fn format_stars(stars: u8) -> String {
    let filled = stars.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn format_list(items: &[String]) -> String {
    items.join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("ירח דבש רומנטי", 7), "ירח ...");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1800.0), "החל מ-$1,800");
        assert_eq!(format_price(950.0), "החל מ-$950");
        assert_eq!(format_price(1234567.4), "החל מ-$1,234,567");
        assert_eq!(format_price(-5.0), "החל מ-$0");
    }

    #[test]
    fn test_format_stars() {
        assert_eq!(format_stars(4), "★★★★☆");
        assert_eq!(format_stars(9), "★★★★★");
    }
}
