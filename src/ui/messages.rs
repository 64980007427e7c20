use crate::core::membership::validity::Severity;
use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}====================== {}\n{}", FG_BLUE, BOLD, msg, RESET);
}

/// Front-desk notice: bold title, then the message in the tier's color.
/// Errors go to stdout too, the desk screen shows them inline.
pub fn notice<T: fmt::Display, M: fmt::Display>(severity: Severity, title: T, msg: M) {
    let (color, icon) = match severity {
        Severity::Error => (FG_RED, ICON_ERR),
        Severity::Warning => (FG_YELLOW, ICON_WARN),
        Severity::Success => (FG_GREEN, ICON_OK),
    };
    println!("{}{}{} {}{}", color, BOLD, icon, title, RESET);
    println!("   {}{}{}", color, msg, RESET);
}
