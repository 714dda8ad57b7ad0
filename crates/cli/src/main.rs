// Pressroom CLI - generate, preview and lay out product comparisons

mod exit_codes;
mod script;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use pressroom_config::{AIDiagnostics, ResolvedAIConfig, Settings};
use pressroom_core::{render_page, ComparisonData, Desk, GenerateError, Generator, GroundingSource};
use pressroom_gen_client::GeminiClient;

use exit_codes::{
    generate_exit_code, EXIT_ARTICLE_PARSE, EXIT_ERROR, EXIT_IO, EXIT_SCRIPT, EXIT_SUCCESS, EXIT_USAGE,
};

const DEFAULT_WIDTH: usize = 72;

#[derive(Parser)]
#[command(name = "pressroom")]
#[command(about = "Newspaper-style product comparisons: generate, edit, print")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a comparison of two products and print the final edition
    #[command(after_help = "\
Examples:
  pressroom generate 'Sony A7IV' 'Canon R6II'
  pressroom generate 'Kindle' 'Kobo Clara' --json > edition.json")]
    Generate {
        /// First product
        product_a: String,

        /// Second product
        product_b: String,

        /// Print {data, sources} as JSON instead of the page
        #[arg(long)]
        json: bool,

        /// Page width in columns
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: usize,
    },

    /// Print the final edition of a saved article
    #[command(after_help = "\
Accepts a bare article or the {data, sources} object written by `generate --json`.
Use - to read from stdin.")]
    Preview {
        file: PathBuf,

        /// Page width in columns
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: usize,
    },

    /// Replay a canvas script and print the resulting blocks as JSON
    #[command(after_help = "\
Script commands (one per line, # for comments):
  add <headline|text|product> [as NAME]
  drag <REF> <DX> <DY>        resize <REF> <DW> <DH>
  press <move|resize> <REF> <X> <Y>    move <X> <Y>    release
  lock | unlock | toggle      delete <REF>
  edit <REF> <content|name|pros|cons|link> <TEXT...>
REF is a name bound with `as`, or #N for the N-th block.")]
    Canvas {
        /// Script file (- for stdin)
        script: PathBuf,

        /// Print rendered block views instead of stored blocks
        #[arg(long)]
        render: bool,
    },

    /// Check generation configuration
    Doctor {
        /// Output as JSON for machine parsing
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { product_a, product_b, json, width } => cmd_generate(product_a, product_b, json, width),
        Commands::Preview { file, width } => cmd_preview(&file, width),
        Commands::Canvas { script, render } => cmd_canvas(&script, render),
        Commands::Doctor { json } => cmd_doctor(json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(path: &Path, err: io::Error) -> Self {
        Self { code: EXIT_IO, message: format!("{}: {}", path.display(), err), hint: None }
    }

    pub fn article(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ARTICLE_PARSE, message: msg.into(), hint: None }
    }

    pub fn script(err: script::ScriptError) -> Self {
        Self { code: EXIT_SCRIPT, message: err.to_string(), hint: None }
    }

    /// Generation failure with the message the desk shows.
    pub fn generate(err: &GenerateError, message: impl Into<String>) -> Self {
        let hint = match err {
            GenerateError::MissingKey => {
                Some("set PRESSROOM_GEMINI_KEY or store a key in the system keychain".to_string())
            }
            GenerateError::NotConfigured(_) => {
                Some(format!("set ai.provider in {}", Settings::config_path_display()))
            }
            _ => None,
        };
        Self { code: generate_exit_code(err), message: message.into(), hint }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// What `generate --json` writes and `preview` reads back.
#[derive(Debug, Serialize, Deserialize)]
struct Edition {
    data: ComparisonData,
    #[serde(default)]
    sources: Vec<GroundingSource>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SavedArticle {
    Edition(Edition),
    Article(ComparisonData),
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(|e| CliError::io(path, e))?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string(), hint: None })?;
    println!("{}", out);
    Ok(())
}

// ============================================================================
// generate
// ============================================================================

fn cmd_generate(product_a: String, product_b: String, json: bool, width: usize) -> Result<(), CliError> {
    let settings = Settings::load();
    let config = ResolvedAIConfig::from_settings(&settings.ai);

    let mut desk = Desk::new(ComparisonData::draft()).with_lock_on_preview(settings.lock_on_preview);
    desk.set_product_a(product_a);
    desk.set_product_b(product_b);

    let Some(ticket) = desk.begin_submit() else {
        return Err(CliError::usage("both product names are required"));
    };

    let client = match GeminiClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            let message = e.user_message();
            desk.finish_submit(Err(e.clone()));
            return Err(CliError::generate(&e, message));
        }
    };

    let result = client.generate(&ticket.product_a, &ticket.product_b);
    let failure = result.as_ref().err().cloned();
    desk.finish_submit(result);

    if let Some(err) = failure {
        let message = desk.error().unwrap_or_default().to_string();
        return Err(CliError::generate(&err, message));
    }

    desk.commit_to_print();
    if json {
        print_json(&Edition { data: desk.data().clone(), sources: desk.sources().to_vec() })
    } else {
        print!("{}", render_page(desk.data(), desk.sources(), width));
        Ok(())
    }
}

// ============================================================================
// preview
// ============================================================================

fn cmd_preview(file: &Path, width: usize) -> Result<(), CliError> {
    let contents = read_input(file)?;
    let edition = match serde_json::from_str::<SavedArticle>(&contents) {
        Ok(SavedArticle::Edition(edition)) => edition,
        Ok(SavedArticle::Article(data)) => Edition { data, sources: Vec::new() },
        Err(e) => {
            return Err(CliError::article(format!("{}: not a comparison article ({})", file.display(), e))
                .with_hint("expected the JSON written by `pressroom generate --json`"));
        }
    };
    print!("{}", render_page(&edition.data, &edition.sources, width));
    Ok(())
}

// ============================================================================
// canvas
// ============================================================================

fn cmd_canvas(path: &Path, render: bool) -> Result<(), CliError> {
    let source = read_input(path)?;
    let commands = script::parse(&source).map_err(CliError::script)?;

    let mut replay = script::Replay::default();
    replay.run(&commands).map_err(CliError::script)?;
    let session = replay.into_session();
    log::debug!("replayed {} commands, {} blocks", commands.len(), session.blocks().len());

    if render {
        print_json(&session.render())
    } else {
        print_json(&session.blocks())
    }
}

// ============================================================================
// doctor
// ============================================================================

fn cmd_doctor(json: bool) -> Result<(), CliError> {
    let config = ResolvedAIConfig::load();
    let diag = AIDiagnostics::from_resolved(&config);

    if json {
        print_json(&serde_json::json!({
            "schema_version": 1,
            "status": diag.status.as_str(),
            "blocking_reason": diag.blocking_reason,
            "provider": diag.provider,
            "model": diag.model,
            "endpoint": diag.endpoint,
            "timeout_secs": diag.timeout_secs,
            "grounding": diag.grounding,
            "key": if diag.key_present { "present" } else { "missing" },
            "key_source": diag.key_source.as_str(),
            "keychain": if diag.keychain_available { "ok" } else { "unavailable" },
            "config_path": Settings::config_path_display(),
        }))
    } else {
        print!("{}", diag);
        println!("Settings file:     {}", Settings::config_path_display());
        Ok(())
    }
}
