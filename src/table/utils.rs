/// Trim whitespace, then strip any run of `'` / `"` from both ends.
pub fn clean_field(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::clean_field;

    #[test]
    fn trims_then_strips_quotes() {
        assert_eq!(clean_field("  PLN "), "PLN");
        assert_eq!(clean_field("\"PLN\""), "PLN");
        assert_eq!(clean_field(" 'PLN' "), "PLN");
        assert_eq!(clean_field("'\"x'"), "x");
        assert_eq!(clean_field("\"\""), "");
    }

    #[test]
    fn whitespace_inside_quotes_survives() {
        assert_eq!(clean_field(" ' x ' "), " x ");
        assert_eq!(clean_field("O'Brien"), "O'Brien");
    }
}
