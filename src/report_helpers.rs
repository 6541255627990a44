use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Compute the max display width of a column, with a minimum of `min`.
/// Uses terminal display width so accented place names line up.
pub fn max_display_width<'a>(cells: impl Iterator<Item = &'a str>, min: usize) -> usize {
    cells.map(UnicodeWidthStr::width).max().unwrap_or(min).max(min)
}

/// Left-align `text` in a column `width` cells wide.
pub fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}

/// Print a horizontal separator of box-drawing chars.
pub fn separator(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Serialize to pretty JSON and print to stdout.
pub fn print_json_stdout(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "report_helpers_test.rs"]
mod tests;
