//! Boxed output

use std::fmt::Write;

use console::{Style, measure_text_width};

/// Draw `text` inside a rounded box, one row per line
///
/// Widths are measured without ANSI escapes, so styled lines line up.
pub fn boxed(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let width = lines
        .iter()
        .map(|line| measure_text_width(line))
        .max()
        .unwrap_or(0);
    let border = "─".repeat(width + 2);

    let mut out = format!("╭{border}╮\n");
    for line in lines {
        let pad = " ".repeat(width - measure_text_width(line));
        let _ = writeln!(out, "│ {line}{pad} │");
    }
    let _ = write!(out, "╰{border}╯");
    out
}

/// Print the clone summary: header in bold green, URLs in cyan
pub fn print_summary(summary: &str) {
    let mut lines = summary.lines();
    let mut styled = Vec::new();
    if let Some(header) = lines.next() {
        styled.push(Style::new().bold().green().apply_to(header).to_string());
    }
    for line in lines {
        styled.push(match line.split_once(": ") {
            Some((label, url)) => format!(
                "{} {}",
                Style::new().bold().apply_to(format!("{label}:")),
                Style::new().cyan().apply_to(url)
            ),
            None => line.to_string(),
        });
    }
    println!("{}", boxed(&styled.join("\n")));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_pads_to_widest_line() {
        let text = boxed("ab\nabcd");
        assert_eq!(
            text,
            "╭──────╮\n\
             │ ab   │\n\
             │ abcd │\n\
             ╰──────╯"
        );
    }

    #[test]
    fn test_box_ignores_ansi_in_width() {
        let styled = Style::new().force_styling(true).red().apply_to("ab").to_string();
        let text = boxed(&format!("{styled}\nabc"));
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(measure_text_width(rows[1]), measure_text_width(rows[2]));
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let text = boxed("a\n\nb");
        assert_eq!(text.lines().count(), 5);
        assert_eq!(text.lines().nth(2), Some("│   │"));
    }
}
