/// Splits text into lines, keeping each line's terminator.
///
/// Concatenating the result reproduces `text` exactly.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Whether a line holds nothing but whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Whether a line is a `//` comment.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with("//")
}

/// Appends `line` to `out`, terminating the previous line first if it lacks a newline.
pub fn push_line(out: &mut Vec<String>, line: String) {
    terminate_last(out);
    out.push(line);
}

/// Makes sure the last line in `out`, if any, ends with a newline.
pub fn terminate_last(out: &mut [String]) {
    if let Some(last) = out.last_mut()
        && !last.ends_with('\n')
    {
        last.push('\n');
    }
}
