use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` to at most `max_width` terminal columns, no ellipsis. A wide
/// character that would straddle the limit is dropped whole.
pub fn truncate_width(s: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Left-align `s` in a column exactly `width` terminal columns wide,
/// ending in "..." when it has to be cut.
pub fn column(s: &str, width: usize) -> String {
    let cut = if s.width() <= width {
        s.to_string()
    } else {
        format!("{}...", truncate_width(s, width.saturating_sub(3)))
    };
    let pad = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(pad))
}

pub fn progress_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
