//! Panelmark - render agent answers as HTML panels.
//!
//! # Usage
//!
//! ```bash
//! panelmark answer.md
//! panelmark --panel reply.json -o panel.html
//! curl -s localhost:8080/agent -d @query.json | panelmark --panel
//! panelmark --watch answer.md -o answer.html
//! ```

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use panelmark::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use panelmark::document::{InputFormat, parse_input};
use panelmark::panel::{Panel, error_html};
use panelmark::perf;
use panelmark::render::render_with;
use panelmark::watcher::{DEFAULT_DEBOUNCE, InputWatcher, POLL_INTERVAL};

/// Render agent answers written in a small markdown dialect as HTML
#[derive(Parser, Debug)]
#[command(name = "panelmark", version, about, long_about = None)]
struct Cli {
    /// Markdown file or JSON reply to render (reads stdin when omitted or `-`)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Write HTML to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// How to interpret the input
    #[arg(long, value_enum)]
    input_format: Option<InputFormat>,

    /// Wrap the content with the mode indicator and source list
    #[arg(long)]
    panel: bool,

    /// Merge lists separated only by blank lines into one list
    #[arg(long)]
    merge_lists: bool,

    /// Re-render whenever FILE changes
    #[arg(short, long)]
    watch: bool,

    /// Print stage timings to stderr
    #[arg(long)]
    perf: bool,

    /// Write render and watcher events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    /// Flags given on this command line, in the shape saved to config files.
    fn config_flags(&self) -> ConfigFlags {
        ConfigFlags {
            watch: self.watch,
            panel: self.panel,
            merge_lists: self.merge_lists,
            perf: self.perf,
            input_format: self.input_format,
            render_debug_log: self.render_debug_log.clone(),
        }
    }
}

fn input_path(cli: &Cli) -> Option<&Path> {
    cli.file
        .as_deref()
        .filter(|path| path.as_os_str() != "-")
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let _stage = perf::stage("read_input");
    if let Some(path) = path {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

fn render_input(text: &str, path: Option<&Path>, flags: &ConfigFlags) -> Result<String> {
    let _stage = perf::stage("render");
    let format = flags.input_format.unwrap_or_default();
    let input = parse_input(text, format, path).context("Failed to decode input")?;
    let options = flags.render_options();
    let html = if flags.panel {
        Panel::from_reply(&input.into_reply())
            .with_options(options)
            .to_html()
    } else {
        render_with(&input.document(), &options)
    };
    perf::record(
        "render.done",
        format!("input_bytes={} output_bytes={}", text.len(), html.len()),
    );
    Ok(html)
}

fn write_output(html: &str, output: Option<&Path>) -> Result<()> {
    let _stage = perf::stage("write_output");
    if let Some(path) = output {
        return std::fs::write(path, format!("{html}\n"))
            .with_context(|| format!("Failed to write {}", path.display()));
    }
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{html}").context("Failed to write stdout")?;
    stdout.flush().context("Failed to flush stdout")
}

fn render_file_once(path: &Path, output: Option<&Path>, flags: &ConfigFlags) -> Result<()> {
    let text = read_input(Some(path))?;
    match render_input(&text, Some(path), flags) {
        Ok(html) => write_output(&html, output),
        // Keep the panel showing something useful while the file is mid-edit.
        Err(err) if flags.panel => {
            tracing::warn!("{err:#}");
            write_output(&error_html(&format!("{err:#}")), output)
        }
        Err(err) => Err(err),
    }
}

fn watch(path: &Path, output: Option<&Path>, flags: &ConfigFlags) -> Result<()> {
    let mut watcher = InputWatcher::new(path, DEFAULT_DEBOUNCE)
        .with_context(|| format!("Failed to watch {}", path.display()))?;
    eprintln!("Watching {} (Ctrl-C to stop)", watcher.target_path().display());
    loop {
        std::thread::sleep(POLL_INTERVAL);
        if !watcher.take_change_ready() {
            continue;
        }
        tracing::info!("{} changed, re-rendering", path.display());
        if let Err(err) = render_file_once(path, output, flags) {
            tracing::warn!("render failed: {err:#}");
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pure HTML.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.config_flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_print_timings(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("PANELMARK_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::open_event_log(render_debug_log_path.as_deref()) {
        tracing::warn!(
            "Failed to initialize render debug log {}: {}",
            render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let path = input_path(&cli);
    let output = cli.output.as_deref();

    if effective.watch {
        let Some(path) = path else {
            anyhow::bail!("--watch needs an input FILE");
        };
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        render_file_once(path, output, &effective)?;
        return watch(path, output, &effective);
    }

    let text = read_input(path)?;
    let html = render_input(&text, path, &effective)?;
    write_output(&html, output)
}
