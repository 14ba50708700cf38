//! Whitespace and quoting rules shared by the scanner and the trace, matching
//! what the dashboard's script engine does with the same report text.

/// Whitespace as the widget's `trim()` sees it: Unicode White_Space minus
/// NEL (U+0085), plus the byte-order mark.
pub fn is_report_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

pub fn trim_report(s: &str) -> &str {
    s.trim_matches(is_report_space)
}

pub fn trim_report_start(s: &str) -> &str {
    s.trim_start_matches(is_report_space)
}

/// Quote a string for trace output: single quotes unless the text contains
/// one, then double quotes, then backticks.
pub fn quote(s: &str) -> String {
    let q = if !s.contains('\'') { '\'' }
        else if !s.contains('"') { '"' }
        else { '`' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(q);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == q => { out.push('\\'); out.push(c); }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

/// `[ 'a', 'b' ]`, or `[]` when empty.
pub fn fmt_str_list(items: &[&str]) -> String {
    if items.is_empty() { return "[]".into(); }
    let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
    format!("[ {} ]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_strips_bom_and_unicode_spaces() {
        assert_eq!(trim_report("\u{feff}/:7"), "/:7");
        assert_eq!(trim_report("\u{a0}\u{2003} /boot:6\r\n\u{3000}"), "/boot:6");
        assert_eq!(trim_report_start("\u{feff} 12 "), "12 ");
    }

    #[test]
    fn trim_keeps_next_line_char() {
        assert_eq!(trim_report("\u{85}/:1"), "\u{85}/:1");
    }

    #[test]
    fn quote_picks_delimiter() {
        assert_eq!(quote("/boot"), "'/boot'");
        assert_eq!(quote("it's"), "\"it's\"");
        assert_eq!(quote("'\""), "`'\"`");
        assert_eq!(quote("a\\b\n"), "'a\\\\b\\n'");
    }

    #[test]
    fn list_formatting() {
        assert_eq!(fmt_str_list(&[]), "[]");
        assert_eq!(fmt_str_list(&["/:7", "/boot:6"]), "[ '/:7', '/boot:6' ]");
    }
}
