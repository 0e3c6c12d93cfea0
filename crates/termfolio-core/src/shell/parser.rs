//! Input normalization

/// A normalized command line split into name and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Trimmed, lowercased line as it is echoed and stored in history
    pub line: String,
    /// First word
    pub name: String,
    /// Remaining words
    pub args: Vec<String>,
}

/// Parse raw input. Returns `None` for blank input.
pub fn parse(input: &str) -> Option<ParsedCommand> {
    let line = input.trim().to_lowercase();
    if line.is_empty() {
        return None;
    }

    let mut words = line.split_whitespace().map(str::to_string);
    let name = words.next()?;
    let args = words.collect();

    Some(ParsedCommand { line, name, args })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("help", "help", &[])]
    #[case("  HELP  ", "help", &[])]
    #[case("ls -la", "ls", &["-la"])]
    #[case("cat   About.TXT", "cat", &["about.txt"])]
    #[case("blog hello-world extra", "blog", &["hello-world", "extra"])]
    fn test_parse(#[case] input: &str, #[case] name: &str, #[case] args: &[&str]) {
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.name, name);
        assert_eq!(parsed.args, args);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_input(#[case] input: &str) {
        assert!(parse(input).is_none());
    }

    #[test]
    fn test_line_keeps_inner_spacing() {
        let parsed = parse("  Cat   about.txt ").unwrap();
        assert_eq!(parsed.line, "cat   about.txt");
    }
}
