use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliThemeConfig {
    pub enabled: bool,
    pub header: String,
    pub id: String,
    pub company: String,
    pub role: String,
    pub status: String,
    pub muted: String,
}

impl Default for CliThemeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            header: "Yellow".to_string(),
            id: "DarkGray".to_string(),
            company: "Cyan".to_string(),
            role: "Green".to_string(),
            status: "Magenta".to_string(),
            muted: "DarkGray".to_string(),
        }
    }
}

pub struct CliTheme {
    pub enabled: bool,
    pub header: crossterm::style::Color,
    pub id: crossterm::style::Color,
    pub company: crossterm::style::Color,
    pub role: crossterm::style::Color,
    pub status: crossterm::style::Color,
    pub muted: crossterm::style::Color,
}

impl CliTheme {
    fn from_config(config: CliThemeConfig) -> Self {
        Self {
            enabled: config.enabled,
            header: parse_color(&config.header),
            id: parse_color(&config.id),
            company: parse_color(&config.company),
            role: parse_color(&config.role),
            status: parse_color(&config.status),
            muted: parse_color(&config.muted),
        }
    }
}

pub fn load_cli_theme(override_path: Option<PathBuf>) -> Result<CliTheme> {
    let path = resolve_cli_theme_path(override_path)?;
    if let Some(path) = path {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("unable to read {}", path.display()))?;
        let config = serde_json::from_str(&data)
            .with_context(|| format!("unable to parse {}", path.display()))?;
        return Ok(CliTheme::from_config(config));
    }
    Ok(CliTheme::from_config(CliThemeConfig::default()))
}

fn resolve_cli_theme_path(override_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    if let Some(path) = override_path {
        return Ok(Some(path));
    }

    let project_dirs = ProjectDirs::from("", "", "apptrack")
        .ok_or_else(|| anyhow!("unable to resolve config directory"))?;
    let candidate = project_dirs.config_dir().join("cli.json");
    if candidate.exists() {
        Ok(Some(candidate))
    } else {
        Ok(None)
    }
}

fn parse_color(name: &str) -> crossterm::style::Color {
    use crossterm::style::Color;

    match name.to_lowercase().replace(['_', ' '], "").as_str() {
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "gray" => Color::Grey,
        "darkgray" => Color::DarkGrey,
        "lightred" => Color::Red,
        "lightgreen" => Color::Green,
        "lightyellow" => Color::Yellow,
        "lightblue" => Color::Blue,
        "lightmagenta" => Color::Magenta,
        "lightcyan" => Color::Cyan,
        _ => Color::White,
    }
}
