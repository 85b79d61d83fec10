//! The `.advgpt` game format for text adventures.
//!
//! A game is a single JSON document holding metadata, a graph of locations
//! joined by exits, item definitions, flag defaults and the player's state.
//! This crate defines that document, validates it, and reads and writes it.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use advgpt_format::{create_empty_game, create_location, edit, load, save, validate};
//!
//! let mut game = create_empty_game();
//! let (id, hall) = create_location("hall", "Great Hall", "Banners hang from the rafters.")
//!     .exit("south", "start")
//!     .into_entry();
//! edit::add_location(&mut game, id, hall)?;
//! edit::add_exit(&mut game, "start", "north", "hall")?;
//! assert!(validate(&game).is_empty());
//!
//! save(&game, Path::new("castle.advgpt"))?;
//! let loaded = load(Path::new("castle.advgpt"))?;
//! assert_eq!(loaded, game);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod edit;
pub mod error;
pub mod factory;
pub mod graph;
pub mod limits;
pub mod persistence;
pub mod reference;
pub mod sample;
pub mod schema;
pub mod validation;

pub use edit::EditError;
pub use error::FormatError;
pub use factory::{ItemBuilder, LocationBuilder, create_empty_game, create_item, create_location};
pub use limits::{EngineLimits, LimitWarning, check_engine_limits};
pub use persistence::{FILE_EXTENSION, load, load_with, save, save_new, save_new_with, save_with};
pub use schema::{
    ExtraFields, FlagDefaults, FlagMap, GameDocument, Item, Location, Meta, PlayerState,
};
pub use validation::{
    Scope, ValidationError, ValidationOptions, validate, validate_value, validate_value_with,
    validate_with,
};
