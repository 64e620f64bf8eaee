mod output;
mod theme;

use std::fmt::Write;
use std::io::{self, Write as IoWrite};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{
    ColorChoice, Command, CommandFactory, FromArgMatches, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Color as ClapColor, RgbColor, Style},
    },
    error::ErrorKind,
};
use colored::{Color as ThemeColor, Colorize, control::ShouldColorize};

use ftgen::config::CONFIG_FILE;
use ftgen::{GenerateError, GenerationReport, Generator, GeneratorConfig};
use output::{GlobalOptions, OutputManager, QUIET_ENV};
use theme::{THEME, icons};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("RUST_LOG", "Log filter for diagnostics (e.g. ftgen=debug)"),
    (QUIET_ENV, "Print only the generated script paths"),
    ("NO_COLOR", "Disable colored output"),
];

const EXAMPLES: &[&str] = &[
    "ftgen init_search_indexes",
    "ftgen add_cache_embedding",
    "RUST_LOG=ftgen=debug ftgen rebuild_indexes",
];

#[derive(Parser)]
#[command(name = "ftgen")]
#[command(version)]
#[command(
    about = "Generate versioned RediSearch index migration scripts",
    long_about = r#"Generates a drop-then-create RediSearch migration for every indexed record type:

• One shell script (redis-cli heredoc) and one PowerShell script per run
• Next version number derived from the scripts already on disk
• Index schemas derived from #[derive(SearchIndexed)] record types
"#
)]
struct Cli {
    /// Migration name, used in both generated filenames (V<n>__<name>.sh/.ps1)
    name: String,
}

impl Cli {
    fn parse_with_styles() -> Self {
        let command = build_cli_command();
        let parsed = command
            .styles(help_styles())
            .try_get_matches()
            .and_then(|matches| Cli::from_arg_matches(&matches));
        match parsed {
            Ok(cli) => cli,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = print_blank_line_stdout();
                    if let Err(print_err) = err.print()
                        && print_err.kind() != io::ErrorKind::BrokenPipe
                    {
                        eprintln!("Failed to display help: {print_err}");
                    }
                    let _ = print_blank_line_stdout();
                    std::process::exit(0);
                }
                _ => {
                    let _ = print_blank_line_stderr();
                    if let Err(print_err) = err.print()
                        && print_err.kind() != io::ErrorKind::BrokenPipe
                    {
                        eprintln!("Failed to display error: {print_err}");
                    }
                    let _ = print_blank_line_stderr();
                    std::process::exit(err.exit_code());
                }
            },
        }
    }
}

fn build_cli_command() -> Command {
    let use_color = detect_color_support();
    let appendix = render_appendix(use_color);
    Cli::command()
        .after_long_help(appendix)
        .color(if use_color { ColorChoice::Auto } else { ColorChoice::Never })
}

fn render_appendix(use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let heading = stylize("Examples:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{heading}");
    for command in EXAMPLES {
        let arrow = stylize(icons::ARROW, theme.secondary, false, use_color);
        let command_text = stylize(command, theme.secondary, false, use_color);
        let _ = writeln!(buffer, "  {arrow} {command_text}");
    }

    buffer.push('\n');

    let env_heading = stylize("Environment Variables:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{env_heading}");
    for (key, description) in ENVIRONMENT_VARIABLES {
        let key_text = stylize(key, theme.key, true, use_color);
        let value_text = stylize(description, theme.value, false, use_color);
        let _ = writeln!(buffer, "  {key_text}  {value_text}");
    }

    buffer.push('\n');

    let tip_heading = stylize("Tip:", theme.highlight, true, use_color);
    let tip_text = stylize(
        &format!("Place an {CONFIG_FILE} in the working directory to override module, namespace and output paths."),
        theme.secondary,
        false,
        use_color,
    );
    let _ = writeln!(buffer, "{tip_heading} {tip_text}");

    buffer
}

fn print_blank_line_stdout() -> io::Result<()> {
    let mut stdout = io::stdout();
    IoWrite::write_all(&mut stdout, b"\n")?;
    IoWrite::flush(&mut stdout)
}

fn print_blank_line_stderr() -> io::Result<()> {
    let mut stderr = io::stderr();
    IoWrite::write_all(&mut stderr, b"\n")?;
    IoWrite::flush(&mut stderr)
}

fn stylize(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    if use_color {
        let styled = text.color(color);
        if bold { styled.bold().to_string() } else { styled.to_string() }
    } else {
        text.to_string()
    }
}

fn detect_color_support() -> bool {
    ShouldColorize::from_env().should_colorize()
}

fn help_styles() -> Styles {
    let theme = &THEME;
    Styles::styled()
        .usage(style_from_color(theme.primary).bold())
        .header(style_from_color(theme.highlight).bold())
        .literal(style_from_color(theme.secondary))
        .placeholder(style_from_color(theme.muted))
        .valid(style_from_color(theme.success))
        .invalid(style_from_color(theme.warning))
        .error(style_from_color(theme.error).bold())
}

fn style_from_color(color: ThemeColor) -> Style {
    Style::new().fg_color(Some(color_to_clap_color(color)))
}

fn color_to_clap_color(color: ThemeColor) -> ClapColor {
    match color {
        ThemeColor::Black => ClapColor::Ansi(AnsiColor::Black),
        ThemeColor::Red => ClapColor::Ansi(AnsiColor::Red),
        ThemeColor::Green => ClapColor::Ansi(AnsiColor::Green),
        ThemeColor::Yellow => ClapColor::Ansi(AnsiColor::Yellow),
        ThemeColor::Blue => ClapColor::Ansi(AnsiColor::Blue),
        ThemeColor::Magenta => ClapColor::Ansi(AnsiColor::Magenta),
        ThemeColor::Cyan => ClapColor::Ansi(AnsiColor::Cyan),
        ThemeColor::White => ClapColor::Ansi(AnsiColor::White),
        ThemeColor::BrightBlack => ClapColor::Ansi(AnsiColor::BrightBlack),
        ThemeColor::BrightRed => ClapColor::Ansi(AnsiColor::BrightRed),
        ThemeColor::BrightGreen => ClapColor::Ansi(AnsiColor::BrightGreen),
        ThemeColor::BrightYellow => ClapColor::Ansi(AnsiColor::BrightYellow),
        ThemeColor::BrightBlue => ClapColor::Ansi(AnsiColor::BrightBlue),
        ThemeColor::BrightMagenta => ClapColor::Ansi(AnsiColor::BrightMagenta),
        ThemeColor::BrightCyan => ClapColor::Ansi(AnsiColor::BrightCyan),
        ThemeColor::BrightWhite => ClapColor::Ansi(AnsiColor::BrightWhite),
        ThemeColor::TrueColor { r, g, b } => ClapColor::Rgb(RgbColor(r, g, b)),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse_with_styles();
    let output = OutputManager::new(GlobalOptions::from_env());

    if let Err(err) = execute(&cli, &output) {
        output.error(&format!("Error: {err}"));
        let code = err.downcast_ref::<GenerateError>().map_or(1, GenerateError::exit_code);
        std::process::exit(code);
    }
}

fn execute(cli: &Cli, output: &OutputManager) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let config = GeneratorConfig::load_from(&cwd)?;
    let generator = Generator::new(config);

    output.heading(&format!("Generate Migration: {}", cli.name));

    let report = generator.run(&cli.name, &cwd, Utc::now())?;
    print_report(&generator, &report, output);
    Ok(())
}

fn print_report(generator: &Generator, report: &GenerationReport, output: &OutputManager) {
    let artifact = &report.artifact;

    output.key_value("Module", &report.layout.root.display().to_string());
    output.key_value("Source", &generator.source_label(&report.layout.root));
    output.key_value("Version", &format!("V{}", artifact.version));
    output.info(&format!("Indexed {} record type(s):", report.entities.len()));
    for entity in &report.entities {
        output.bullet(entity);
    }

    output.success("Generated migration scripts:");
    output.artifact(&display_path(&artifact.shell_path));
    output.artifact(&display_path(&artifact.powershell_path));
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
