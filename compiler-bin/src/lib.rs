pub mod cli;
pub mod logging;

use std::fs;
use std::path::Path;

use analyzer::definition::goto_definition;
use analyzer::hints::scan_hints;
use analyzer::hover::hover;
use analyzer::references::find_references;
use analyzer::rename::{RenameResult, process_rename};
use anyhow::{Context, bail};
use ast::{named, typed};
use files::{FileId, SourceLocation, SourcePosition};
use serde::Serialize;

use crate::cli::{Command, Config, Cursor};

/// Reads a name-resolved program and infers its types.
#[tracing::instrument(skip_all, name = "load")]
pub fn load(path: &Path) -> anyhow::Result<typed::Root> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let root: named::Root = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse '{}'", path.display()))?;

    tracing::info!(files = root.files.len(), defs = root.defs.len(), "loaded");

    let checked = checking::check(&root).map_err(|error| match error.loc() {
        Some(loc) => match root.files.path(loc.file) {
            Some(path) => anyhow::anyhow!("{path}: {error}"),
            None => anyhow::anyhow!("{error}"),
        },
        None => anyhow::anyhow!("internal error: {error}"),
    })?;

    Ok(checked)
}

fn cursor(root: &typed::Root, cursor: &Cursor) -> anyhow::Result<(FileId, SourcePosition)> {
    let Some(file) = root.files.id(&cursor.file) else {
        bail!("Unknown file '{}'", cursor.file);
    };
    Ok((file, SourcePosition::new(cursor.line, cursor.column)))
}

fn describe(root: &typed::Root, loc: SourceLocation) -> String {
    match root.files.path(loc.file) {
        Some(path) => format!("{path}:{}-{}", loc.start, loc.end),
        None => format!("{}:{}-{}", loc.file, loc.start, loc.end),
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run(config: &Config) -> anyhow::Result<()> {
    match &config.command {
        Command::Check(program) => {
            let root = load(&program.program)?;
            if config.json {
                let count = root.defs.len();
                print_json(&serde_json::json!({ "status": "ok", "defs": count }))?;
            } else {
                for def in root.defs.values() {
                    println!("{}: {}", def.sym, def.spec.scheme);
                }
            }
        }
        Command::Rename { program, cursor: position, new_name } => {
            let root = load(&program.program)?;
            let (file, position) = cursor(&root, position)?;
            let result = process_rename(&root, new_name, file, position);
            if config.json {
                print_json(&result)?;
            } else {
                match result {
                    RenameResult::Success(edit) => {
                        for edit in edit.edits() {
                            println!("{} => {}", describe(&root, edit.loc), edit.new_text);
                        }
                    }
                    RenameResult::InvalidRequest(message) => bail!(message),
                }
            }
        }
        Command::Hints { program, files } => {
            let root = load(&program.program)?;
            let ids = if files.is_empty() {
                root.files.iter_id().collect()
            } else {
                files
                    .iter()
                    .map(|path| root.files.id(path).with_context(|| format!("Unknown file '{path}'")))
                    .collect::<anyhow::Result<Vec<_>>>()?
            };
            let hints = scan_hints(&root, &ids);
            if config.json {
                print_json(&hints)?;
            } else {
                for hint in hints {
                    println!("{}: {:?}", describe(&root, hint.loc), hint.kind);
                }
            }
        }
        Command::References { program, cursor: position } => {
            let root = load(&program.program)?;
            let (file, position) = cursor(&root, position)?;
            let references = find_references(&root, file, position).unwrap_or_default();
            if config.json {
                print_json(&references)?;
            } else {
                for loc in references {
                    println!("{}", describe(&root, loc));
                }
            }
        }
        Command::Definition { program, cursor: position } => {
            let root = load(&program.program)?;
            let (file, position) = cursor(&root, position)?;
            let definition = goto_definition(&root, file, position);
            if config.json {
                print_json(&definition)?;
            } else if let Some(loc) = definition {
                println!("{}", describe(&root, loc));
            }
        }
        Command::Hover { program, cursor: position } => {
            let root = load(&program.program)?;
            let (file, position) = cursor(&root, position)?;
            let hover = hover(&root, file, position);
            if config.json {
                print_json(&hover)?;
            } else if let Some(hover) = hover {
                println!("{}", hover.contents);
            }
        }
    }
    Ok(())
}
