use std::borrow::Cow;

/// Rewrite `\r\n` and lone `\r` to `\n`.
///
/// Borrows when the input has no carriage returns, so a second pass over
/// already-normalized text never allocates.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }

    Cow::Owned(out)
}
