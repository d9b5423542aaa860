/// Get the second comma separated field of a line, the text between the first
/// and second comma (or the end of the line)
pub fn second_field(line: &str) -> Option<&str> {
    line.split(',').nth(1)
}

/// Get the first two comma separated fields of a line
pub fn first_two_fields(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split(',');

    Some((fields.next()?, fields.next()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_field_stops_at_next_comma() {
        assert_eq!(second_field("x,Line 5"), Some("Line 5"));
        assert_eq!(second_field("x,Line 5,extra"), Some("Line 5"));
        assert_eq!(second_field(","), Some(""));
        assert_eq!(second_field("no comma"), None);
    }

    #[test]
    fn first_two_fields_needs_a_comma() {
        assert_eq!(first_two_fields("07:00,07:05"), Some(("07:00", "07:05")));
        assert_eq!(first_two_fields("07:00,07:05,x"), Some(("07:00", "07:05")));
        assert_eq!(first_two_fields("07:00"), None);
    }
}
