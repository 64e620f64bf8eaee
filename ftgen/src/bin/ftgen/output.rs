use colored::Colorize;
use colored::control::ShouldColorize;

use crate::theme::{THEME, icons};

/// Environment variable that silences everything but errors and the artifact paths.
pub const QUIET_ENV: &str = "FTGEN_QUIET";

/// Global options that affect output
#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub quiet: bool,
    pub no_color: bool,
}

impl GlobalOptions {
    /// `NO_COLOR`/`CLICOLOR` are honoured through `colored`; quiet mode via [`QUIET_ENV`].
    pub fn from_env() -> Self {
        let quiet = std::env::var(QUIET_ENV).is_ok_and(|value| !value.is_empty() && value != "0");
        Self {
            quiet,
            no_color: !ShouldColorize::from_env().should_colorize(),
        }
    }
}

/// Output manager handles formatting and display
pub struct OutputManager {
    pub options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    /// Display a success message with color and icon
    pub fn success(&self, message: &str) {
        if !self.options.quiet {
            println!("{}", self.format(icons::SUCCESS, message, THEME.success));
        }
    }

    /// Display an error message with color and icon
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.format(icons::ERROR, message, THEME.error));
    }

    /// Display info message with color and icon
    pub fn info(&self, message: &str) {
        if !self.options.quiet {
            println!("{}", self.format(icons::INFO, message, THEME.info));
        }
    }

    /// Display a heading
    pub fn heading(&self, text: &str) {
        if !self.options.quiet {
            let output = if self.options.no_color {
                format!("\n{text}\n{}", "=".repeat(text.chars().count()))
            } else {
                format!("\n{}", text.color(THEME.primary).bold())
            };
            println!("{output}");
        }
    }

    /// Display a key-value pair
    pub fn key_value(&self, key: &str, value: &str) {
        if !self.options.quiet {
            let output = if self.options.no_color {
                format!("  {key}: {value}")
            } else {
                format!("  {}: {}", key.color(THEME.key).bold(), value.color(THEME.value))
            };
            println!("{output}");
        }
    }

    /// Display a bullet list item
    pub fn bullet(&self, text: &str) {
        if !self.options.quiet {
            let output = if self.options.no_color {
                format!("  {} {text}", icons::BULLET)
            } else {
                format!("  {} {text}", icons::BULLET.color(THEME.muted))
            };
            println!("{output}");
        }
    }

    /// Print a generated artifact path. Shown even in quiet mode: it is the run's result.
    pub fn artifact(&self, path: &str) {
        let output = if self.options.no_color {
            format!("{} {path}", icons::FILE)
        } else {
            format!("{} {}", icons::FILE, path.color(THEME.highlight))
        };
        println!("{output}");
    }

    fn format(&self, icon: &str, message: &str, color: colored::Color) -> String {
        if self.options.no_color {
            format!("{icon} {message}")
        } else {
            format!("{} {}", icon.color(color), message.color(color))
        }
    }
}
