//! Small text helpers shared by the emitters.

/// Remove the common leading indentation, dropping leading blank lines.
/// Whitespace-only lines come out empty.
pub fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };

    let min_indent = lines[start..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    lines[start..]
        .iter()
        .map(|l| if l.trim().is_empty() { "" } else { &l[min_indent..] })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix every non-empty line with `prefix`.
pub fn indent(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|l| {
            if l.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, l)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The docstring without its first (signature) line and any blank lines
/// right after it.
pub fn docstring_body(doc: &str) -> String {
    let lines: Vec<&str> = doc.lines().skip(1).skip_while(|l| l.trim().is_empty()).collect();
    lines.join("\n")
}

/// First line of a docstring, or `""`.
pub fn first_line(doc: &str) -> &str {
    doc.lines().next().unwrap_or("")
}
