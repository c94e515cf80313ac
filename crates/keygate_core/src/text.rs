/// Returns the byte offset of the start of the line containing `offset`.
#[must_use]
pub fn find_line_start(content: &str, offset: usize) -> usize {
    content[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// Returns the byte offset of the next newline after `offset`, or the end
/// of `content` if there is no trailing newline.
#[must_use]
pub fn find_line_end(content: &str, offset: usize) -> usize {
    content[offset..].find('\n').map_or(content.len(), |i| offset + i)
}

/// Returns the trimmed source line containing `offset`.
#[must_use]
pub fn line_at(content: &str, offset: usize) -> &str {
    let start = find_line_start(content, offset);
    let end = find_line_end(content, offset);
    content[start..end].trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_line_start_at_beginning_returns_zero() {
        assert_eq!(find_line_start("hello", 0), 0);
        assert_eq!(find_line_start("hello", 3), 0);
    }

    #[test]
    fn find_line_start_on_second_line_returns_position_after_newline() {
        let content = "line1\nline2";
        assert_eq!(find_line_start(content, 6), 6);
        assert_eq!(find_line_start(content, 8), 6);
    }

    #[test]
    fn find_line_start_at_newline_returns_start_of_current_line() {
        let content = "line1\nline2";
        assert_eq!(find_line_start(content, 5), 0);
    }

    #[test]
    fn find_line_end_on_single_line_returns_content_length() {
        let content = "hello";
        assert_eq!(find_line_end(content, 0), 5);
        assert_eq!(find_line_end(content, 3), 5);
    }

    #[test]
    fn find_line_end_on_first_line_stops_at_newline() {
        let content = "line1\nline2";
        assert_eq!(find_line_end(content, 0), 5);
        assert_eq!(find_line_end(content, 3), 5);
    }

    #[test]
    fn line_at_returns_trimmed_line() {
        let content = "first\n  const key = \"abc\";  \nlast";
        assert_eq!(line_at(content, 10), "const key = \"abc\";");
    }

    #[test]
    fn line_at_handles_single_line_content() {
        assert_eq!(line_at("  only line  ", 4), "only line");
    }

    #[test]
    fn helpers_handle_empty_content() {
        assert_eq!(find_line_start("", 0), 0);
        assert_eq!(find_line_end("", 0), 0);
        assert_eq!(line_at("", 0), "");
    }

    #[test]
    fn helpers_handle_consecutive_newlines() {
        let content = "\n\n\n";
        assert_eq!(find_line_start(content, 1), 1);
        assert_eq!(find_line_end(content, 1), 1);
        assert_eq!(line_at(content, 1), "");
    }
}
