//! Replays an editing session from stdin and prints the document and the
//! suggestion list after every step.
//!
//! ```text
//! mentionkit [settings.json] < script
//! ```
//!
//! Script commands: `type <text>`, `backspace`, `down`, `up`, `enter`, `esc`,
//! `hover <n>`, `click <n>`, `editor-click`, `caret <n>`, `blur`, `wait <ms>`.

mod logging;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use mentionkit::app::{Document, Plugin};
use mentionkit::kernel::services::adapters::{build_config, ensure_settings_file, load_settings_from};
use mentionkit::kernel::services::ports::{AutocompleteConfig, ConfigResult};
use mentionkit::kernel::Key;

const ARROW_RIGHT: u32 = 39;

fn main() -> io::Result<()> {
    let logging = logging::init();
    if let Some(guard) = logging.as_ref() {
        eprintln!("logs: {}", guard.log_dir().display());
    }

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(settings_path.as_deref());
    let mut plugin = Plugin::new(config, Document::default());
    let mut clock = Instant::now();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match run_step(&mut plugin, &mut clock, line) {
            Ok(()) => render(&plugin, &mut out)?,
            Err(msg) => writeln!(out, "error: {msg}")?,
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> AutocompleteConfig {
    let loaded = match path {
        Some(path) => read_config(path),
        None => ensure_settings_file()
            .map_err(Into::into)
            .and_then(|path| read_config(&path)),
    };

    loaded.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "falling back to default settings");
        AutocompleteConfig::default()
    })
}

fn read_config(path: &Path) -> ConfigResult<AutocompleteConfig> {
    let settings = load_settings_from(path)?;
    tracing::info!(path = %path.display(), "settings loaded");
    build_config(&settings)
}

fn run_step(plugin: &mut Plugin, clock: &mut Instant, line: &str) -> Result<(), String> {
    let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));
    match cmd {
        "type" => {
            plugin.type_text(arg);
        }
        "backspace" => {
            plugin.backspace();
        }
        "down" => {
            plugin.press(Key::Down);
        }
        "up" => {
            plugin.press(Key::Up);
        }
        "enter" => {
            plugin.press(Key::Enter);
        }
        "esc" => {
            plugin.press(Key::Escape);
        }
        "hover" => {
            plugin.hover(parse_number(arg)?);
        }
        "click" => {
            plugin.click_item(parse_number(arg)?);
        }
        "editor-click" => {
            plugin.click_editor();
        }
        "caret" => {
            plugin.document_mut().set_caret(parse_number(arg)?);
            plugin.key_up(Key::Other(ARROW_RIGHT));
        }
        "blur" => {
            plugin.blur(*clock);
        }
        "wait" => {
            let ms = parse_number(arg)? as u64;
            *clock += Duration::from_millis(ms);
            plugin.tick(*clock);
        }
        other => return Err(format!("unknown command {other:?}")),
    }
    Ok(())
}

fn parse_number(arg: &str) -> Result<usize, String> {
    arg.trim()
        .parse::<usize>()
        .map_err(|_| format!("expected a number, got {arg:?}"))
}

fn render(plugin: &Plugin, out: &mut impl Write) -> io::Result<()> {
    let document = plugin.document();
    let mut text = document.text();
    let byte = text
        .char_indices()
        .nth(document.caret())
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    text.insert(byte, '|');
    writeln!(out, "{text}")?;

    for line in plugin.popup().render_lines() {
        writeln!(out, "    {line}")?;
    }
    Ok(())
}
