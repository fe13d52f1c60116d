//! Display normalization for failure details.

/// Errors longer than this many characters are truncated.
pub const ERROR_DISPLAY_LIMIT: usize = 1000;

/// Number of backtrace lines shown for a failed job.
pub const BACKTRACE_DISPLAY_LINES: usize = 10;

/// Insert a space after every comma directly followed by a non-space character.
///
/// Unspaced comma lists (`a,b,c`) otherwise render as one unbreakable word.
pub fn space_after_commas(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == ',' {
            if let Some(next) = chars.peek() {
                if !next.is_whitespace() {
                    out.push(' ');
                }
            }
        }
    }
    out
}

/// Error text as displayed in the failed-job list.
pub fn trim_error(err: &str) -> String {
    let spaced = space_after_commas(err);
    if spaced.chars().count() > ERROR_DISPLAY_LIMIT {
        let mut cut: String = spaced.chars().take(ERROR_DISPLAY_LIMIT - 3).collect();
        cut.push_str("...");
        cut
    } else {
        spaced
    }
}

/// The leading backtrace lines worth showing.
pub fn backtrace_head(backtrace: &[String]) -> &[String] {
    &backtrace[..backtrace.len().min(BACKTRACE_DISPLAY_LINES)]
}
