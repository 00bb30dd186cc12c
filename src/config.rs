use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::InputFormat;
use crate::render::{ListMode, RenderOptions};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub panel: bool,
    pub merge_lists: bool,
    pub perf: bool,
    pub input_format: Option<InputFormat>,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            panel: self.panel || other.panel,
            merge_lists: self.merge_lists || other.merge_lists,
            perf: self.perf || other.perf,
            input_format: other.input_format.or(self.input_format),
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        let list_mode = if self.merge_lists {
            ListMode::Merged
        } else {
            ListMode::Contiguous
        };
        RenderOptions::default().with_list_mode(list_mode)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("panelmark").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("panelmark")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("panelmark").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("panelmark")
                .join("config");
        }
    }

    PathBuf::from(".panelmarkrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".panelmarkrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# panelmark defaults (saved with --save)".to_string());
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.panel {
        lines.push("--panel".to_string());
    }
    if flags.merge_lists {
        lines.push("--merge-lists".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(format) = flags.input_format {
        let format_str = match format {
            InputFormat::Auto => "auto",
            InputFormat::Markdown => "markdown",
            InputFormat::Json => "json",
        };
        lines.push(format!("--input-format {format_str}"));
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--watch" || token == "-w" {
            flags.watch = true;
        } else if token == "--panel" {
            flags.panel = true;
        } else if token == "--merge-lists" {
            flags.merge_lists = true;
        } else if token == "--perf" {
            flags.perf = true;
        } else if token == "--input-format" {
            if let Some(next) = tokens.get(i + 1) {
                flags.input_format = parse_input_format(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--input-format=") {
            flags.input_format = parse_input_format(value);
        } else if token == "--render-debug-log" {
            if let Some(next) = tokens.get(i + 1) {
                flags.render_debug_log = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--render-debug-log=") {
            flags.render_debug_log = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

fn parse_input_format(s: &str) -> Option<InputFormat> {
    match s {
        "auto" => Some(InputFormat::Auto),
        "markdown" => Some(InputFormat::Markdown),
        "json" => Some(InputFormat::Json),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "panelmark".to_string(),
            "--watch".to_string(),
            "--panel".to_string(),
            "--merge-lists".to_string(),
            "--input-format".to_string(),
            "json".to_string(),
            "--render-debug-log=render.log".to_string(),
            "reply.json".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert!(flags.watch);
        assert!(flags.panel);
        assert!(flags.merge_lists);
        assert!(!flags.perf);
        assert_eq!(flags.input_format, Some(InputFormat::Json));
        assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
    }

    #[test]
    fn test_short_watch_flag_is_recognized() {
        let args = vec![
            "panelmark".to_string(),
            "-w".to_string(),
            "a.md".to_string(),
        ];
        assert!(parse_flag_tokens(&args).watch);
    }

    #[test]
    fn test_unknown_input_format_is_ignored() {
        let args = vec!["--input-format".to_string(), "yaml".to_string()];
        assert_eq!(parse_flag_tokens(&args).input_format, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            watch: true,
            input_format: Some(InputFormat::Markdown),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            panel: true,
            input_format: Some(InputFormat::Json),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.watch);
        assert!(merged.panel);
        assert_eq!(merged.input_format, Some(InputFormat::Json));
    }

    #[test]
    fn test_render_options_follow_merge_lists() {
        let flags = ConfigFlags {
            merge_lists: true,
            ..ConfigFlags::default()
        };
        assert_eq!(flags.render_options().list_mode, ListMode::Merged);
        assert_eq!(
            ConfigFlags::default().render_options().list_mode,
            ListMode::Contiguous
        );
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".panelmarkrc");
        let flags = ConfigFlags {
            watch: true,
            panel: true,
            merge_lists: true,
            perf: true,
            input_format: Some(InputFormat::Markdown),
            render_debug_log: Some(PathBuf::from("render.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_config_loads_defaults() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }
}
