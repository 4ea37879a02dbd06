//! Command-line interface for scribe
//!
//! Replays serialized token scripts through the rendering pipeline.
//!
//! Usage:
//!   scribe render `<script>` [--indent `<unit>`] [--spacing `<rules.yaml>`]  - Render a script to text
//!   scribe spans `<script>` [--indent `<unit>`] [--spacing `<rules.yaml>`]   - Render and report node spans
//!   scribe list-rules [--spacing `<rules.yaml>`]                         - Print the active spacing table

use clap::{Arg, Command};
use std::fs;
use std::process;

use scribe::scribe::pipeline::{self, RenderConfig};
use scribe::scribe::replay::Script;
use scribe::scribe::spacing::SpacingRules;
use tracing::debug;

fn main() {
    tracing_subscriber::fmt::init();

    let matches = Command::new("scribe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for rendering token scripts to source text")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Render a script to text")
                .arg(
                    Arg::new("script")
                        .help("Path to the token script (JSON)")
                        .required(true)
                        .index(1),
                )
                .arg(indent_arg())
                .arg(spacing_arg()),
        )
        .subcommand(
            Command::new("spans")
                .about("Render a script and report per-node output spans")
                .arg(
                    Arg::new("script")
                        .help("Path to the token script (JSON)")
                        .required(true)
                        .index(1),
                )
                .arg(indent_arg())
                .arg(spacing_arg()),
        )
        .subcommand(
            Command::new("list-rules")
                .about("Print the active spacing rule table")
                .arg(spacing_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("render", submatches)) => {
            let path = submatches.get_one::<String>("script").unwrap();
            let config = build_config(submatches);
            handle_render_command(path, config);
        }
        Some(("spans", submatches)) => {
            let path = submatches.get_one::<String>("script").unwrap();
            let config = build_config(submatches);
            handle_spans_command(path, config);
        }
        Some(("list-rules", submatches)) => {
            let config = build_config(submatches);
            handle_list_rules_command(&config);
        }
        _ => unreachable!(),
    }
}

fn indent_arg() -> Arg {
    Arg::new("indent")
        .long("indent")
        .help("Indentation unit written per depth level")
        .default_value("\t")
}

fn spacing_arg() -> Arg {
    Arg::new("spacing")
        .long("spacing")
        .help("Path to a YAML spacing rule table")
}

/// Assemble a RenderConfig from the common arguments; not every
/// subcommand defines both, so lookups must tolerate absent ids
fn build_config(matches: &clap::ArgMatches) -> RenderConfig {
    let mut config = RenderConfig::default();

    if let Ok(Some(indent)) = matches.try_get_one::<String>("indent") {
        config.indentation = indent.clone();
    }

    if let Ok(Some(path)) = matches.try_get_one::<String>("spacing") {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("Error reading spacing table {}: {}", path, err);
                process::exit(1);
            }
        };
        match SpacingRules::from_yaml(&text) {
            Ok(rules) => config.spacing = rules,
            Err(err) => {
                eprintln!("Error parsing spacing table {}: {}", path, err);
                process::exit(1);
            }
        }
    }

    config
}

fn load_script(path: &str) -> Script {
    match Script::load(path) {
        Ok(script) => {
            debug!(path, ops = script.len(), "script loaded");
            script
        }
        Err(err) => {
            eprintln!("Error loading script {}: {}", path, err);
            process::exit(1);
        }
    }
}

/// Handle the render command
fn handle_render_command(path: &str, config: RenderConfig) {
    let script = load_script(path);
    let mut writer = pipeline::plain(config);
    script.replay(&mut writer);
    print!("{}", writer.finish());
}

/// Handle the spans command
fn handle_spans_command(path: &str, config: RenderConfig) {
    let script = load_script(path);
    let (mut writer, spans) = pipeline::capturing(config);
    script.replay(&mut writer);
    print!("{}", writer.finish());

    println!("---");
    for (id, span) in spans.entries() {
        match span.text_span() {
            Some(text_span) => println!("{} {}", id, text_span),
            None => println!("{} unknown", id),
        }
    }
}

/// Handle the list-rules command
fn handle_list_rules_command(config: &RenderConfig) {
    match serde_yaml::to_string(config.spacing.rules()) {
        Ok(yaml) => print!("{}", yaml),
        Err(err) => {
            eprintln!("Error serializing rule table: {}", err);
            process::exit(1);
        }
    }
}
