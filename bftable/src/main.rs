//! # bftable
//!
//! A CLI for rendering Bayes-factor comparison tables from JSON
//! model-comparison records.
//!
//! ## Overview
//!
//! bftable is built on top of bftablelib and provides a command-line
//! interface for the comparison tables embedded in statistical reports:
//! pick the denominator model, sort a column, filter rows with the
//! `+`/`-`/`#` search syntax, and render to the terminal, JSON, or a
//! standalone HTML document.
//!
//! ## Usage
//!
//! ```bash
//! # Render a comparison table against the first model
//! bftable comparisons.json
//!
//! # Divide by the third model instead, sorted by Bayes factor
//! bftable comparisons.json --denominator 2 --sort bf --desc
//!
//! # Rows with "Slope" required, two-term models only
//! bftable comparisons.json --filter "+Slope #2"
//!
//! # Output as JSON
//! bftable comparisons.json --output json
//!
//! # Standalone HTML document
//! bftable html comparisons.json --out report.html
//! ```

use std::process::ExitCode;

use anyhow::Context as _;
use bftablelib::{
    decode_comparisons, ModelType, SortColumn, TableView, LINEAR_MODEL,
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use outstanding::cli::{App, CommandContext, HandlerResult, Output, RunResult};

mod render;

use render::{build_table_context, create_theme};

/// Include template at compile time
const BF_TABLE_TEMPLATE: &str = include_str!("../templates/bf_table.jinja");

/// Pass-through template for the html subcommand
const HTML_TEMPLATE: &str = "{{ html }}";

/// Table arguments shared by the root command and subcommands
fn table_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("input")
            .help("Path to a JSON array of comparison records")
            .required(true),
    )
    .arg(
        Arg::new("model-type")
            .short('t')
            .long("model-type")
            .default_value(LINEAR_MODEL)
            .help("Model-type tag carried next to the data blob"),
    )
    .arg(
        Arg::new("denominator")
            .short('d')
            .long("denominator")
            .default_value("0")
            .help("Record index of the denominator model"),
    )
    .arg(
        Arg::new("sort")
            .short('s')
            .long("sort")
            .value_parser(["label", "model", "value", "bf", "error", "terms"])
            .help("Sort column"),
    )
    .arg(
        Arg::new("desc")
            .long("desc")
            .action(ArgAction::SetTrue)
            .requires("sort")
            .help("Sort descending"),
    )
    .arg(
        Arg::new("filter")
            .short('f')
            .long("filter")
            .help("Row filter: +required -excluded bare-or #terms"),
    )
}

/// Build the clap Command structure
fn build_command() -> Command {
    let root = Command::new("bftable")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bayes-factor comparison tables from JSON model-comparison records")
        .subcommand_negates_reqs(true)
        .subcommand(table_args(
            Command::new("show").about("Render a comparison table (default command)"),
        ))
        .subcommand(
            table_args(Command::new("html").about("Emit a standalone HTML document"))
                .arg(
                    Arg::new("out")
                        .short('o')
                        .long("out")
                        .help("Write the document to a file instead of stdout"),
                )
                .arg(
                    Arg::new("container")
                        .long("container")
                        .default_value("bftable1")
                        .help("Container id scoping the table's element ids"),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .default_value("Bayes factor comparison")
                        .help("Document title"),
                ),
        );
    table_args(root)
}

/// Build a table view from common arguments
fn load_view(matches: &ArgMatches) -> Result<TableView, anyhow::Error> {
    let input = matches
        .get_one::<String>("input")
        .context("missing input file")?;
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read '{}'", input))?;
    let records = decode_comparisons(&json)?;

    let tag = matches
        .get_one::<String>("model-type")
        .map(|s| s.as_str())
        .unwrap_or(LINEAR_MODEL);
    let mut view = TableView::new(records, ModelType::new(tag))?;

    if let Some(denominator) = matches.get_one::<String>("denominator") {
        let index: usize = denominator
            .parse()
            .with_context(|| format!("invalid denominator index '{}'", denominator))?;
        view.select_denominator(index)?;
    }

    if let Some(sort) = matches.get_one::<String>("sort") {
        let column: SortColumn = sort.parse().map_err(anyhow::Error::msg)?;
        view.toggle_sort(column)?;
        if matches.get_flag("desc") {
            view.toggle_sort(column)?;
        }
    }

    if let Some(filter) = matches.get_one::<String>("filter") {
        if !view.set_search(filter) {
            anyhow::bail!(
                "invalid filter '{}': '#' terms need a model type with countable terms",
                filter
            );
        }
    }

    Ok(view)
}

/// Handler for the show command (and the bare root invocation)
fn show_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let view = load_view(matches)?;
    let table = view.render()?;

    // For JSON mode, return the derived table itself
    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(serde_json::to_value(&table)?));
    }

    let context = build_table_context(&table, view.model_type().as_str(), &view.sort_state());
    Ok(Output::Render(serde_json::to_value(&context)?))
}

/// Handler for the html command
fn html_handler(matches: &ArgMatches, _ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    let view = load_view(matches)?;
    let table = view.render()?;

    let container = matches
        .get_one::<String>("container")
        .map(|s| s.as_str())
        .unwrap_or("bftable1");
    let title = matches
        .get_one::<String>("title")
        .map(|s| s.as_str())
        .unwrap_or("Bayes factor comparison");

    let html = bftablelib::render_document(&table, container, title);

    if let Some(out) = matches.get_one::<String>("out") {
        std::fs::write(out, &html).with_context(|| format!("failed to write '{}'", out))?;
        return Ok(Output::Silent);
    }

    Ok(Output::Render(serde_json::json!({ "html": html })))
}

fn main() -> ExitCode {
    let cmd = build_command();
    let theme = create_theme();

    // Build the outstanding app with command handlers and run
    let result = App::builder()
        .theme(theme)
        .command("show", show_handler, BF_TABLE_TEMPLATE)
        .command("html", html_handler, HTML_TEMPLATE)
        .run_to_string(cmd, std::env::args());

    match result {
        RunResult::Handled(output) => {
            if !output.is_empty() {
                if output.starts_with("Error:") {
                    eprintln!("{}", output);
                    return ExitCode::FAILURE;
                }
                print!("{}", output);
            }
            ExitCode::SUCCESS
        }
        RunResult::Binary(_, _) => ExitCode::SUCCESS,
        RunResult::NoMatch(matches) => {
            // Handle root command (no subcommand) - treat as show
            let output_mode = matches
                .get_one::<String>("_output_mode")
                .map(|s| match s.as_str() {
                    "json" => outstanding::OutputMode::Json,
                    "text" => outstanding::OutputMode::Text,
                    "term-debug" => outstanding::OutputMode::TermDebug,
                    "term" => outstanding::OutputMode::Term,
                    _ => outstanding::OutputMode::Auto,
                })
                .unwrap_or(outstanding::OutputMode::Auto);

            let ctx = CommandContext {
                output_mode,
                command_path: vec![],
            };

            match show_handler(&matches, &ctx) {
                Ok(Output::Render(value)) => {
                    if output_mode.is_structured() {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&value).unwrap_or_default()
                        );
                    } else {
                        let theme = create_theme();
                        match outstanding::render(BF_TABLE_TEMPLATE, &value, &theme) {
                            Ok(output) => {
                                print!("{}", output);
                            }
                            Err(e) => {
                                eprintln!("Error: {e}");
                                return ExitCode::FAILURE;
                            }
                        }
                    }
                    ExitCode::SUCCESS
                }
                Ok(Output::Silent) => ExitCode::SUCCESS,
                Ok(Output::Binary { .. }) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
