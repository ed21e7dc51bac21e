use std::fmt;

/// Writes `text` with the five XML special characters replaced by entities.
///
/// Safe for both element content and double-quoted attribute values.
pub(crate) fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let mut last = 0;
    for (i, c) in text.char_indices() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            '\'' => "&apos;",
            _ => continue,
        };
        f.write_str(&text[last..i])?;
        f.write_str(entity)?;
        last = i + c.len_utf8();
    }
    f.write_str(&text[last..])
}

/// Writes ` name="value"` with the value escaped.
pub(crate) fn write_attr(f: &mut fmt::Formatter<'_>, name: &str, value: &str) -> fmt::Result {
    write!(f, " {name}=\"")?;
    write_escaped(f, value)?;
    f.write_str("\"")
}
