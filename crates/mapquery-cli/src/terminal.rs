//! Terminal styling.

/// ANSI escape codes used by the text renderer.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for place names and headings.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for tree lines and secondary values.
    pub const GRAY: &str = "\x1b[90m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
}

/// Resolved color codes, empty when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            green: colors::GREEN,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            cyan: "",
            green: "",
        }
    }

    /// `colored()` when [`supports_color`] allows it, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Whether ANSI colors should be emitted.
///
/// Respects `NO_COLOR` (<https://no-color.org/>) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a count with thousand separators.
///
/// ```
/// # use mapquery_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_at_thousands() {
        assert_eq!(format_with_separators(0), "0");
        assert_eq!(format_with_separators(1000), "1,000");
        assert_eq!(format_with_separators(100000), "100,000");
    }

    #[test]
    fn plain_palette_is_empty() {
        let palette = ColorPalette::plain();
        assert!(palette.reset.is_empty());
        assert!(palette.white_bold.is_empty());
    }
}
