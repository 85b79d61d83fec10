//! Implementations of the `advgpt` subcommands.
//!
//! Each command writes its report to `out` and returns whether it succeeded,
//! so `main` decides the exit code and tests can capture the output.

use std::io::{ErrorKind, Write};
use std::path::Path;

use advgpt_format::graph::unreachable_locations;
use advgpt_format::reference::format_reference;
use advgpt_format::sample::tower_of_dreams;
use advgpt_format::{
    EngineLimits, FormatError, ValidationOptions, check_engine_limits, create_empty_game,
    load_with, save, save_new,
};
use anyhow::{Context, bail};
use chrono::{DateTime, Utc};

/// Options for `advgpt new`.
#[derive(Debug, Default)]
pub struct NewOptions {
    pub title: Option<String>,
    pub author: Option<String>,
    pub sample: bool,
    pub force: bool,
}

/// Create a game file at `path`. Without `force` an existing file is never
/// replaced, even one that appears while the game is being written.
pub fn new_game(
    path: &Path,
    options: NewOptions,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut game = if options.sample {
        tower_of_dreams()
    } else {
        create_empty_game()
    };
    if let Some(title) = options.title {
        game.meta.title = title;
    }
    if let Some(author) = options.author {
        game.meta.author = author;
    }
    game.meta.touch(now);

    let saved = if options.force {
        save(&game, path)
    } else {
        save_new(&game, path)
    };
    match saved {
        Ok(()) => {}
        Err(FormatError::Io { source, .. }) if source.kind() == ErrorKind::AlreadyExists => {
            bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to create {}", path.display()));
        }
    }
    tracing::info!(path = %path.display(), title = %game.meta.title, "created game");
    writeln!(out, "created {} ({})", path.display(), game.meta.title)?;
    Ok(())
}

/// Validate the game at `path`. Returns `Ok(false)` when the file is
/// readable but invalid; other failures are errors.
pub fn validate_file(
    path: &Path,
    options: &ValidationOptions,
    engine_limits: bool,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let game = match load_with(path, options) {
        Ok(game) => game,
        Err(FormatError::Invalid { errors }) => {
            writeln!(out, "{}: {} error(s)", path.display(), errors.len())?;
            for error in &errors {
                writeln!(out, "  - {error}")?;
            }
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    };

    writeln!(out, "{}: valid", path.display())?;
    if engine_limits {
        let warnings = check_engine_limits(&game, &EngineLimits::default());
        for warning in &warnings {
            writeln!(out, "  warning: {warning}")?;
        }
        if !warnings.is_empty() {
            tracing::warn!(count = warnings.len(), "game exceeds engine limits");
        }
    }
    Ok(true)
}

/// Print a summary of the game at `path`.
pub fn info(path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let game = load_with(path, &ValidationOptions::default())
        .with_context(|| format!("failed to load {}", path.display()))?;
    let meta = &game.meta;

    writeln!(out, "{} v{} by {}", meta.title, meta.version, meta.author)?;
    if !meta.description.is_empty() {
        writeln!(out, "{}", meta.description)?;
    }
    if !meta.modified.is_empty() {
        writeln!(out, "modified: {}", meta.modified)?;
    }
    writeln!(out, "start location: {}", game.start_location)?;
    writeln!(out, "locations: {}", game.locations.len())?;
    writeln!(out, "items: {}", game.inventory_items.len())?;
    writeln!(out, "game flags: {}", game.game_flags.len())?;

    let unreachable = unreachable_locations(&game);
    if !unreachable.is_empty() {
        writeln!(out, "unreachable locations: {}", unreachable.join(", "))?;
    }
    Ok(())
}

/// Print the format reference.
pub fn spec(out: &mut impl Write) -> anyhow::Result<()> {
    out.write_all(format_reference().as_bytes())?;
    Ok(())
}
