use super::canned::{ANALYSIS_FOLLOW_UP, ANALYSIS_HEADER, EMPTY_CODE_REPLY, looks_fine};

/// Constructs that must end their line with a colon, in reporting order.
static BLOCK_OPENERS: [(&str, &str); 3] = [
    ("if ", "if statement"),
    ("for ", "for statement"),
    ("def ", "function definition"),
];

/// One finding of the line scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-indexed
    pub line: usize,
    pub construct: &'static str,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: Missing colon after {}", self.line, self.construct)
    }
}

/// Flag `if`/`for`/`def` lines that do not end with a colon.
pub fn scan(code: &str) -> Vec<Diagnostic> {
    code.split('\n')
        .enumerate()
        .flat_map(|(index, line)| {
            let missing_colon = !line.trim().ends_with(':');
            BLOCK_OPENERS
                .iter()
                .filter(move |(token, _)| missing_colon && line.contains(*token))
                .map(move |(_, construct)| Diagnostic {
                    line: index + 1,
                    construct: *construct,
                })
        })
        .collect()
}

/// Reply text for a pasted snippet.
pub fn analyze_code(code: &str) -> String {
    if code.trim().is_empty() {
        return EMPTY_CODE_REPLY.to_string();
    }

    let diagnostics = scan(code);
    if diagnostics.is_empty() {
        return looks_fine(code.split('\n').count());
    }

    let issues = diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    format!("{ANALYSIS_HEADER}\n\n{issues}\n\n{ANALYSIS_FOLLOW_UP}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_colon_on_if_is_reported_with_line_number() {
        let reply = analyze_code("if x > 5\n    print(1)");

        assert!(reply.contains("Line 1: Missing colon after if statement"));
        assert!(reply.starts_with(ANALYSIS_HEADER));
        assert!(reply.ends_with(ANALYSIS_FOLLOW_UP));
    }

    #[test]
    fn well_formed_code_gets_summary_with_line_count() {
        let reply = analyze_code("if x > 5:\n    print(1)");

        assert_eq!(reply, looks_fine(2));
        assert!(reply.contains("- 2 lines of code"));
    }

    #[test]
    fn blank_code_asks_for_code() {
        assert_eq!(analyze_code("   \n\t"), EMPTY_CODE_REPLY);
        assert_eq!(analyze_code(""), EMPTY_CODE_REPLY);
    }

    #[test]
    fn every_opener_is_checked_per_line() {
        let code = "def total(items)\n    for item in items\n        if item\n            pass";

        let diagnostics = scan(code);

        assert_eq!(
            diagnostics,
            vec![
                Diagnostic { line: 1, construct: "function definition" },
                Diagnostic { line: 2, construct: "for statement" },
                Diagnostic { line: 3, construct: "if statement" },
            ]
        );
    }

    #[test]
    fn one_line_can_produce_several_diagnostics() {
        let diagnostics = scan("squares = [x for x in xs if x]");

        let constructs: Vec<_> = diagnostics.iter().map(|d| d.construct).collect();
        assert_eq!(constructs, ["if statement", "for statement"]);
    }

    #[test]
    fn trailing_whitespace_after_colon_is_accepted() {
        assert!(scan("for i in range(3):   \r").is_empty());
    }

    #[test]
    fn diagnostics_are_newline_separated() {
        let reply = analyze_code("if a\nif b");

        assert!(reply.contains(
            "Line 1: Missing colon after if statement\nLine 2: Missing colon after if statement"
        ));
    }
}
