use colored::Color;

/// Colors by role, shared by progress output and clap help styles.
pub struct Theme {
    pub success: Color,
    pub error: Color,
    /// Clap "invalid value" highlight.
    pub warning: Color,
    pub info: Color,
    /// Section headings and artifact paths.
    pub highlight: Color,
    pub muted: Color,
    pub primary: Color,
    /// Example commands and clap literals.
    pub secondary: Color,
    pub key: Color,
    pub value: Color,
}

pub const THEME: Theme = Theme {
    success: Color::Green,
    error: Color::Red,
    warning: Color::Yellow,
    info: Color::Blue,
    highlight: Color::Cyan,
    muted: Color::BrightBlack,
    primary: Color::BrightBlue,
    secondary: Color::Magenta,
    key: Color::BrightCyan,
    value: Color::White,
};

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const INFO: &str = "ℹ";
    pub const ARROW: &str = "→";
    pub const BULLET: &str = "•";
    pub const FILE: &str = "📄";
}
