/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Days-remaining color:
/// unknown or \<0 → red
/// 0..=1 → magenta
/// 2..=3 → yellow
/// \>3 → green
pub fn color_for_days_remaining(days: Option<i64>) -> &'static str {
    match days {
        None => RED,
        Some(d) if d < 0 => RED,
        Some(0..=1) => MAGENTA,
        Some(2..=3) => YELLOW,
        Some(_) => GREEN,
    }
}

/// Wrap `value` in `color`, greying out empty placeholders.
pub fn colorize(value: &str, color: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        format!("{color}{value}{RESET}")
    }
}
