//! metka CLI — driving adapter for the metka match engine.
//!
//! Subcommands:
//! - `eval <rule> --metadata <doc.json>` — evaluate a rule against a metadata document
//! - `check <rule>` — validate a rule loads without errors
//!
//! Exit codes for `eval`: 0 = matched, 1 = not matched, 2 = error.

use std::process;

use metka::config::MetadataMatcherConfig;
use metka::{MetadataMatcher, MetadataStore};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(2);
    }

    let result = match args[1].as_str() {
        "eval" => cmd_eval(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(0)
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(2);
        }
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_eval(args: &[String]) -> Result<i32, String> {
    if args.is_empty() {
        return Err("eval requires a rule file path".into());
    }

    let rule_path = &args[0];
    let metadata_path = parse_metadata_flag(&args[1..])?;

    let rule = load_rule(rule_path)?;
    let store = match metadata_path {
        Some(path) => load_metadata(&path)?,
        None => MetadataStore::new(),
    };

    if rule.matches(&store) {
        println!("matched");
        Ok(0)
    } else {
        println!("not matched");
        Ok(1)
    }
}

fn cmd_check(args: &[String]) -> Result<i32, String> {
    if args.is_empty() {
        return Err("check requires a rule file path".into());
    }

    load_rule(&args[0])?;
    println!("Rule valid");
    Ok(0)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rule and metadata loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_rule(path: &str) -> Result<MetadataMatcher, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;
    parse_rule(&content, is_json_path(path))
}

fn parse_rule(content: &str, is_json: bool) -> Result<MetadataMatcher, String> {
    let config: MetadataMatcherConfig = if is_json {
        serde_json::from_str(content).map_err(|e| format!("JSON parse error: {e}"))?
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(content).map_err(|e| format!("YAML parse error: {e}"))?
    };

    config.compile().map_err(|e| format!("invalid rule: {e}"))
}

fn load_metadata(path: &str) -> Result<MetadataStore, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;
    parse_metadata(&content)
}

fn parse_metadata(content: &str) -> Result<MetadataStore, String> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("JSON parse error: {e}"))?;
    MetadataStore::from_json(value).map_err(|e| e.to_string())
}

fn is_json_path(path: &str) -> bool {
    std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

fn parse_metadata_flag(args: &[String]) -> Result<Option<String>, String> {
    match args {
        [] => Ok(None),
        [flag, path] if flag == "--metadata" => Ok(Some(path.clone())),
        [flag] if flag == "--metadata" => Err("--metadata requires a file path".into()),
        [other, ..] => Err(format!("unexpected argument \"{other}\"")),
    }
}

fn print_usage() {
    eprintln!(
        "Usage: metka <command> [options]

Commands:
  eval <rule> [--metadata <doc.json>]   Evaluate rule against a metadata document
  check <rule>                          Validate rule
  help                                  Show this help

Rule files are YAML by default; a .json extension switches to JSON.
eval exits 0 when matched, 1 when not matched, 2 on error."
    );
}
