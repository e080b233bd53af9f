/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey out placeholder values ("" or "--"), leave the rest as is.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Active entries in green.
pub fn colorize_active(value: &str, active: bool) -> String {
    if active {
        format!("{GREEN}{value}{RESET}")
    } else {
        value.to_string()
    }
}
