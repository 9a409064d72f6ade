//! Logging utilities with colored module prefixes.
//!
//! Provides the `log!` macro for formatted terminal output:
//!
//! ```ignore
//! log!("sitemap"; "{} routes", count);
//! // prints: [sitemap] 42 routes
//! ```

use colored::{ColoredString, Colorize};
use std::io::{Write, stdout};

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

// ============================================================================
// Implementation
// ============================================================================

/// Print a log line: `[module] message`.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Pick a prefix color by module name.
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "sitemap" => prefix.bright_blue().bold(),
        "routes" => prefix.bright_green().bold(),
        "check" | "error" => prefix.bright_red().bold(),
        "suggest" => prefix.bright_magenta().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_contains_module_name() {
        let prefix = colorize_prefix("sitemap", "sitemap");
        let plain = format!("{prefix}");
        assert!(plain.contains("[sitemap]"));
    }

    #[test]
    fn test_unknown_module_gets_default_color() {
        // Smoke test: unknown modules must not panic.
        let prefix = colorize_prefix("Content", "content");
        assert!(format!("{prefix}").contains("[Content]"));
    }
}
