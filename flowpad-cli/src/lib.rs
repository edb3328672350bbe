//! # Flowpad CLI
//!
//! Headless host for the Flowpad editor. Replays a script of input events
//! against an [`EditorController`] and writes the resulting Mermaid markup.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p flowpad-cli -- session.jsonl
//! ```
//!
//! ## Reading events from stdin, writing to a file:
//!
//! ```bash
//! cat session.jsonl | cargo run -p flowpad-cli -- --output diagram.md
//! ```
//!
//! ## Script format
//!
//! One JSON event per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! {"type":"create_node","data":{"shape":"rectangle","x":10,"y":10}}
//! {"type":"text_changed","data":{"text":"Start"}}
//! {"type":"key","data":{"key":"Return"}}
//! {"type":"double_click","data":{"x":20,"y":20}}
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Resolved input/output paths and editor configuration
//! - `TraceCanvas` - Canvas that logs draw commands via tracing
//! - `replay` / `run` - Drive the editor and collect exports

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod canvas;

pub use canvas::TraceCanvas;

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flowpad_core::{
    parse_script, EditorConfig, EditorController, EditorOutput, EditorState, EmptyClickPolicy,
    InputEvent,
};

/// Command-line arguments for flowpad.
#[derive(Debug, Clone, Parser)]
#[command(name = "flowpad")]
#[command(about = "Replay Flowpad editor events and print the Mermaid diagram")]
#[command(version)]
pub struct CliArgs {
    /// Event script, one JSON event per line. Reads stdin when omitted or `-`.
    pub script: Option<PathBuf>,

    /// Write the diagram here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Leave connection mode when empty canvas is clicked
    #[arg(long, env = "FLOWPAD_CANCEL_ON_EMPTY")]
    pub cancel_connection_on_empty_click: bool,

    /// Log level used when `RUST_LOG` is not set
    #[arg(long, env = "FLOWPAD_LOG", default_value = "info")]
    pub log_level: String,
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Script path; `None` reads stdin.
    pub script: Option<PathBuf>,
    /// Output path; `None` writes stdout.
    pub output: Option<PathBuf>,
    /// Editor behavior.
    pub editor: EditorConfig,
    /// Default log level.
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CliConfig {
    /// Create a configuration reading stdin and writing stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            script: None,
            output: None,
            editor: EditorConfig::default(),
            log_level: "info".to_string(),
        }
    }

    /// Default `tracing` filter directive for this configuration.
    #[must_use]
    pub fn log_filter(&self) -> String {
        format!(
            "flowpad_cli={level},flowpad_core={level}",
            level = self.log_level
        )
    }
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        let policy = if args.cancel_connection_on_empty_click {
            EmptyClickPolicy::Cancel
        } else {
            EmptyClickPolicy::KeepPending
        };
        Self {
            script: args.script.filter(|path| path.as_os_str() != "-"),
            output: args.output,
            editor: EditorConfig::default().with_empty_click_policy(policy),
            log_level: args.log_level,
        }
    }
}

/// Result of replaying a script.
#[derive(Debug, Clone)]
pub struct Replay {
    /// Show/copy outputs in the order they were requested.
    pub exports: Vec<EditorOutput>,
    /// Diagram markup after the last event.
    pub text: String,
    /// Interaction state after the last event.
    pub state: EditorState,
    /// Events rejected by the editor.
    pub rejected: usize,
}

/// Feed `events` to a fresh editor.
///
/// A rejected event (an unknown shape) is logged and skipped; the rest of
/// the script still applies.
#[must_use]
pub fn replay(events: &[InputEvent], config: EditorConfig) -> Replay {
    let mut editor = EditorController::with_config(TraceCanvas::new(), config);
    let mut exports = Vec::new();
    let mut rejected = 0;

    for (index, event) in events.iter().enumerate() {
        let number = index + 1;
        if let Some(pos) = event.position() {
            tracing::trace!("Event {number} at ({}, {})", pos.x, pos.y);
        }
        match editor.handle_event(event) {
            Ok(Some(output)) => {
                match &output {
                    EditorOutput::Show(_) => tracing::info!("Export requested at event {number}"),
                    EditorOutput::Copy(_) => tracing::info!("Copy requested at event {number}"),
                }
                exports.push(output);
            }
            Ok(None) => {}
            Err(e) => {
                match event.position() {
                    Some(pos) => tracing::warn!(
                        "Event {number} at ({}, {}) rejected: {e}",
                        pos.x,
                        pos.y
                    ),
                    None => tracing::warn!("Event {number} rejected: {e}"),
                }
                rejected += 1;
            }
        }
    }

    tracing::debug!(
        "Replayed {} events: {} nodes, {} edges, {} canvas commands",
        events.len(),
        editor.model().node_count(),
        editor.model().edge_count(),
        editor.canvas().command_count()
    );

    Replay {
        exports,
        text: editor.diagram_text(),
        state: editor.state(),
        rejected,
    }
}

fn read_script(config: &CliConfig) -> Result<String> {
    match &config.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
        None => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read script from stdin")?;
            Ok(script)
        }
    }
}

fn write_output(config: &CliConfig, text: &str) -> Result<()> {
    match &config.output {
        Some(path) => std::fs::write(path, format!("{text}\n"))
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").context("Failed to write to stdout")
        }
    }
}

/// Read the script, replay it and write the final diagram.
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed, or the output
/// cannot be written.
pub fn run(config: &CliConfig) -> Result<Replay> {
    let script = read_script(config)?;
    let events = parse_script(&script)?;
    tracing::info!("Loaded {} events", events.len());

    let replay = replay(&events, config.editor.clone());
    tracing::debug!("Final state: {}", serde_json::to_string(&replay.state)?);

    write_output(config, &replay.text)?;
    Ok(replay)
}
