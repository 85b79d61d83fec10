//! Structural and referential validation of game documents.
//!
//! Validation never fails and never mutates: it returns the list of problems
//! it found, and an empty list means the document is valid. It runs over the
//! raw JSON tree ([`validate_value`]) so that a missing or wrong-typed field
//! in a file on disk is reported like any other problem instead of aborting
//! the decode. Typed documents built in memory can only break the
//! referential rules, which [`validate`] checks directly.
//!
//! Item identifiers in `Location.items` and `Player.inventory` are not
//! checked against `inventory_items` unless
//! [`ValidationOptions::check_item_references`] is set. Games are allowed to
//! forward-declare items by default.

use std::fmt;

use serde_json::{Map, Value};

use crate::schema::GameDocument;

/// Keys every document must have at the top level.
pub const TOP_LEVEL_KEYS: [&str; 6] = [
    "meta",
    "start_location",
    "locations",
    "inventory_items",
    "game_flags",
    "player",
];

const META_FIELDS: [(&str, JsonKind); 3] = [
    ("title", JsonKind::String),
    ("author", JsonKind::String),
    ("version", JsonKind::String),
];

const LOCATION_FIELDS: [(&str, JsonKind); 3] = [
    ("title", JsonKind::String),
    ("description", JsonKind::String),
    ("exits", JsonKind::Object),
];

const PLAYER_FIELDS: [(&str, JsonKind); 3] = [
    ("inventory", JsonKind::Array),
    ("current_location", JsonKind::String),
    ("flags", JsonKind::Object),
];

// ===========================================================================
// Error types
// ===========================================================================

/// Where in the document a key lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Document,
    Meta,
    Location(String),
    Player,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Document => f.write_str("document"),
            Scope::Meta => f.write_str("meta"),
            Scope::Location(id) => write!(f, "location '{id}'"),
            Scope::Player => f.write_str("player"),
        }
    }
}

/// The JSON type a field was expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Object,
    Array,
    String,
}

impl JsonKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            JsonKind::Object => value.is_object(),
            JsonKind::Array => value.is_array(),
            JsonKind::String => value.is_string(),
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JsonKind::Object => "an object",
            JsonKind::Array => "an array",
            JsonKind::String => "a string",
        })
    }
}

/// A single problem found in a game document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The document is not a JSON object at all.
    #[error("document root must be a JSON object")]
    RootNotObject,

    /// A required key is absent.
    #[error("{scope} is missing required key '{key}'")]
    MissingKey { scope: Scope, key: &'static str },

    /// A key is present but holds the wrong kind of JSON value.
    #[error("'{key}' in {scope} must be {expected}")]
    WrongType {
        scope: Scope,
        key: String,
        expected: JsonKind,
    },

    /// `start_location` names a location that does not exist.
    #[error("start location '{start}' not found in locations")]
    UnknownStartLocation { start: String },

    /// An exit points at a location that does not exist.
    #[error("location '{location}' exit '{direction}' points to non-existent location '{target}'")]
    DanglingExit {
        location: String,
        direction: String,
        target: String,
    },

    /// `player.current_location` names a location that does not exist.
    #[error("player current_location '{location}' not found in locations")]
    UnknownPlayerLocation { location: String },

    /// A location lists an item with no definition. Opt-in.
    #[error("location '{location}' lists undefined item '{item}'")]
    UnknownLocationItem { location: String, item: String },

    /// The player carries an item with no definition. Opt-in.
    #[error("player inventory holds undefined item '{item}'")]
    UnknownInventoryItem { item: String },
}

impl ValidationError {
    /// The location identifier this error is about, if any.
    pub fn location(&self) -> Option<&str> {
        match self {
            ValidationError::MissingKey {
                scope: Scope::Location(id),
                ..
            }
            | ValidationError::WrongType {
                scope: Scope::Location(id),
                ..
            } => Some(id.as_str()),
            ValidationError::DanglingExit { location, .. }
            | ValidationError::UnknownPlayerLocation { location }
            | ValidationError::UnknownLocationItem { location, .. } => Some(location.as_str()),
            ValidationError::UnknownStartLocation { start } => Some(start.as_str()),
            _ => None,
        }
    }
}

/// Optional, stricter checks layered on top of the base rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Report item identifiers in location item lists and the player's
    /// inventory that have no entry in `inventory_items`.
    pub check_item_references: bool,
}

impl ValidationOptions {
    /// Every optional check enabled.
    pub fn strict() -> Self {
        Self {
            check_item_references: true,
        }
    }
}

// ===========================================================================
// Typed documents
// ===========================================================================

/// Validate an in-memory document with the default options.
pub fn validate(doc: &GameDocument) -> Vec<ValidationError> {
    validate_with(doc, &ValidationOptions::default())
}

/// Validate an in-memory document.
///
/// A typed document always has every required key with the right type, so
/// only the referential rules can fail here. Errors come out in the same
/// order [`validate_value_with`] would produce for the serialized document.
pub fn validate_with(doc: &GameDocument, options: &ValidationOptions) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !doc.contains_location(&doc.start_location) {
        errors.push(ValidationError::UnknownStartLocation {
            start: doc.start_location.clone(),
        });
    }

    for (id, location) in &doc.locations {
        for (direction, target) in &location.exits {
            if !doc.contains_location(target) {
                errors.push(ValidationError::DanglingExit {
                    location: id.clone(),
                    direction: direction.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    if !doc.contains_location(&doc.player.current_location) {
        errors.push(ValidationError::UnknownPlayerLocation {
            location: doc.player.current_location.clone(),
        });
    }

    if options.check_item_references {
        for (id, location) in &doc.locations {
            for item in &location.items {
                if !doc.inventory_items.contains_key(item) {
                    errors.push(ValidationError::UnknownLocationItem {
                        location: id.clone(),
                        item: item.clone(),
                    });
                }
            }
        }
        for item in &doc.player.inventory {
            if !doc.inventory_items.contains_key(item) {
                errors.push(ValidationError::UnknownInventoryItem { item: item.clone() });
            }
        }
    }

    errors
}

// ===========================================================================
// Raw JSON trees
// ===========================================================================

/// Validate a raw JSON tree with the default options.
pub fn validate_value(doc: &Value) -> Vec<ValidationError> {
    validate_value_with(doc, &ValidationOptions::default())
}

/// Validate a raw JSON tree.
///
/// If any top-level key is missing, only those errors are returned; the
/// deeper checks assume the containers exist. Otherwise every check runs and
/// errors accumulate in document order.
pub fn validate_value_with(doc: &Value, options: &ValidationOptions) -> Vec<ValidationError> {
    let Some(root) = doc.as_object() else {
        return vec![ValidationError::RootNotObject];
    };

    let mut errors: Vec<ValidationError> = TOP_LEVEL_KEYS
        .into_iter()
        .filter(|key| !root.contains_key(*key))
        .map(|key| ValidationError::MissingKey {
            scope: Scope::Document,
            key,
        })
        .collect();
    if !errors.is_empty() {
        return errors;
    }

    // Meta.
    match root["meta"].as_object() {
        Some(meta) => check_fields(meta, &Scope::Meta, &META_FIELDS, &mut errors),
        None => errors.push(wrong_type(Scope::Document, "meta", JsonKind::Object)),
    }

    // Referential checks need the set of location ids. When `locations` is
    // not an object there is nothing to resolve against, so they are skipped.
    let locations = root["locations"].as_object();
    if locations.is_none() {
        errors.push(wrong_type(Scope::Document, "locations", JsonKind::Object));
    }

    // Start location.
    match (&root["start_location"], locations) {
        (Value::String(start), Some(locs)) if !locs.contains_key(start) => {
            errors.push(ValidationError::UnknownStartLocation {
                start: start.clone(),
            });
        }
        (Value::String(_), _) => {}
        _ => errors.push(wrong_type(
            Scope::Document,
            "start_location",
            JsonKind::String,
        )),
    }

    // Locations.
    if let Some(locs) = locations {
        for (id, location) in locs {
            check_location(id, location, locs, &mut errors);
        }
    }

    // Player.
    let player = root["player"].as_object();
    match player {
        Some(player) => check_fields(player, &Scope::Player, &PLAYER_FIELDS, &mut errors),
        None => errors.push(wrong_type(Scope::Document, "player", JsonKind::Object)),
    }
    if let (Some(player), Some(locs)) = (player, locations) {
        if let Some(Value::String(current)) = player.get("current_location") {
            if !locs.contains_key(current) {
                errors.push(ValidationError::UnknownPlayerLocation {
                    location: current.clone(),
                });
            }
        }
    }

    // Item and flag containers are not walked, but must still be objects.
    let items = root["inventory_items"].as_object();
    if items.is_none() {
        errors.push(wrong_type(
            Scope::Document,
            "inventory_items",
            JsonKind::Object,
        ));
    }
    if !root["game_flags"].is_object() {
        errors.push(wrong_type(Scope::Document, "game_flags", JsonKind::Object));
    }

    if options.check_item_references {
        if let Some(items) = items {
            check_item_references(locations, player, items, &mut errors);
        }
    }

    errors
}

fn wrong_type(scope: Scope, key: impl Into<String>, expected: JsonKind) -> ValidationError {
    ValidationError::WrongType {
        scope,
        key: key.into(),
        expected,
    }
}

/// Report each missing or wrong-typed field, one error per field.
fn check_fields(
    object: &Map<String, Value>,
    scope: &Scope,
    fields: &[(&'static str, JsonKind)],
    errors: &mut Vec<ValidationError>,
) {
    for &(key, kind) in fields {
        match object.get(key) {
            None => errors.push(ValidationError::MissingKey {
                scope: scope.clone(),
                key,
            }),
            Some(value) if !kind.matches(value) => {
                errors.push(wrong_type(scope.clone(), key, kind));
            }
            Some(_) => {}
        }
    }
}

fn check_location(
    id: &str,
    location: &Value,
    all_locations: &Map<String, Value>,
    errors: &mut Vec<ValidationError>,
) {
    let Some(location) = location.as_object() else {
        errors.push(wrong_type(
            Scope::Document,
            format!("locations.{id}"),
            JsonKind::Object,
        ));
        return;
    };

    let scope = Scope::Location(id.to_string());
    check_fields(location, &scope, &LOCATION_FIELDS, errors);

    let Some(Value::Object(exits)) = location.get("exits") else {
        return;
    };
    for (direction, target) in exits {
        match target {
            Value::String(target) if !all_locations.contains_key(target) => {
                errors.push(ValidationError::DanglingExit {
                    location: id.to_string(),
                    direction: direction.clone(),
                    target: target.clone(),
                });
            }
            Value::String(_) => {}
            _ => errors.push(wrong_type(
                scope.clone(),
                format!("exits.{direction}"),
                JsonKind::String,
            )),
        }
    }
}

fn check_item_references(
    locations: Option<&Map<String, Value>>,
    player: Option<&Map<String, Value>>,
    items: &Map<String, Value>,
    errors: &mut Vec<ValidationError>,
) {
    for (id, location) in locations.into_iter().flatten() {
        let Some(Value::Array(listed)) = location.get("items") else {
            continue;
        };
        for item in listed.iter().filter_map(Value::as_str) {
            if !items.contains_key(item) {
                errors.push(ValidationError::UnknownLocationItem {
                    location: id.clone(),
                    item: item.to_string(),
                });
            }
        }
    }

    let Some(Value::Array(inventory)) = player.and_then(|p| p.get("inventory")) else {
        return;
    };
    for item in inventory.iter().filter_map(Value::as_str) {
        if !items.contains_key(item) {
            errors.push(ValidationError::UnknownInventoryItem {
                item: item.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{create_empty_game, create_item, create_location};
    use serde_json::json;

    fn empty_game_value() -> Value {
        serde_json::to_value(create_empty_game()).unwrap()
    }

    #[test]
    fn empty_game_is_valid() {
        assert!(validate(&create_empty_game()).is_empty());
        assert!(validate_value(&empty_game_value()).is_empty());
    }

    #[test]
    fn empty_object_reports_exactly_the_six_top_level_keys() {
        let errors = validate_value(&json!({}));
        assert_eq!(errors.len(), 6);
        for (error, key) in errors.iter().zip(TOP_LEVEL_KEYS) {
            assert_eq!(
                error,
                &ValidationError::MissingKey {
                    scope: Scope::Document,
                    key,
                }
            );
        }
    }

    #[test]
    fn missing_top_level_key_short_circuits_deeper_checks() {
        let mut doc = empty_game_value();
        doc["start_location"] = json!("nowhere");
        doc["meta"] = json!({});
        doc.as_object_mut().unwrap().remove("game_flags");

        let errors = validate_value(&doc);
        assert_eq!(
            errors,
            vec![ValidationError::MissingKey {
                scope: Scope::Document,
                key: "game_flags",
            }]
        );
    }

    #[test]
    fn non_object_root_is_a_single_error() {
        assert_eq!(
            validate_value(&json!([1, 2, 3])),
            vec![ValidationError::RootNotObject]
        );
        assert_eq!(
            validate_value(&Value::Null),
            vec![ValidationError::RootNotObject]
        );
    }

    #[test]
    fn missing_meta_keys_each_reported() {
        let mut doc = empty_game_value();
        doc["meta"] = json!({"author": "me"});
        let errors = validate_value(&doc);
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingKey {
                    scope: Scope::Meta,
                    key: "title",
                },
                ValidationError::MissingKey {
                    scope: Scope::Meta,
                    key: "version",
                },
            ]
        );
    }

    #[test]
    fn dangling_exit_names_location_direction_and_target() {
        let mut doc = empty_game_value();
        doc["locations"]["A"] = json!({
            "title": "A", "description": "a", "exits": {"north": "B"}
        });
        let errors = validate_value(&doc);
        assert_eq!(
            errors,
            vec![ValidationError::DanglingExit {
                location: "A".into(),
                direction: "north".into(),
                target: "B".into(),
            }]
        );
        assert_eq!(errors[0].location(), Some("A"));
    }

    #[test]
    fn dangling_exit_in_typed_document() {
        let mut game = create_empty_game();
        let (id, loc) = create_location("A", "A", "a").exit("north", "B").into_entry();
        game.locations.insert(id, loc);
        assert_eq!(
            validate(&game),
            vec![ValidationError::DanglingExit {
                location: "A".into(),
                direction: "north".into(),
                target: "B".into(),
            }]
        );
    }

    #[test]
    fn unknown_start_location_reported_once() {
        let mut game = create_empty_game();
        game.start_location = "lobby".into();
        assert_eq!(
            validate(&game),
            vec![ValidationError::UnknownStartLocation {
                start: "lobby".into(),
            }]
        );
    }

    #[test]
    fn unknown_player_location_reported_once() {
        let mut doc = empty_game_value();
        doc["player"]["current_location"] = json!("cellar");
        assert_eq!(
            validate_value(&doc),
            vec![ValidationError::UnknownPlayerLocation {
                location: "cellar".into(),
            }]
        );
    }

    #[test]
    fn location_missing_required_keys() {
        let mut doc = empty_game_value();
        doc["locations"]["bare"] = json!({"image": "x.png"});
        let errors = validate_value(&doc);
        let keys: Vec<&str> = errors
            .iter()
            .map(|e| match e {
                ValidationError::MissingKey {
                    scope: Scope::Location(id),
                    key,
                } => {
                    assert_eq!(id, "bare");
                    *key
                }
                other => panic!("unexpected error: {other:?}"),
            })
            .collect();
        assert_eq!(keys, ["title", "description", "exits"]);
    }

    #[test]
    fn missing_player_keys_skip_location_check() {
        let mut doc = empty_game_value();
        doc["player"] = json!({"flags": {}});
        let errors = validate_value(&doc);
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingKey {
                    scope: Scope::Player,
                    key: "inventory",
                },
                ValidationError::MissingKey {
                    scope: Scope::Player,
                    key: "current_location",
                },
            ]
        );
    }

    #[test]
    fn wrong_types_are_reported_not_fatal() {
        let mut doc = empty_game_value();
        doc["meta"]["title"] = json!(42);
        doc["locations"]["start"]["exits"] = json!(["north"]);
        doc["player"]["inventory"] = json!("sword");
        doc["game_flags"] = json!([]);

        let errors = validate_value(&doc);
        assert_eq!(
            errors,
            vec![
                wrong_type(Scope::Meta, "title", JsonKind::String),
                wrong_type(Scope::Location("start".into()), "exits", JsonKind::Object),
                wrong_type(Scope::Player, "inventory", JsonKind::Array),
                wrong_type(Scope::Document, "game_flags", JsonKind::Object),
            ]
        );
    }

    #[test]
    fn non_object_locations_skips_referential_checks() {
        let mut doc = empty_game_value();
        doc["locations"] = json!("start");
        let errors = validate_value(&doc);
        assert_eq!(
            errors,
            vec![wrong_type(Scope::Document, "locations", JsonKind::Object)]
        );
    }

    #[test]
    fn non_string_exit_target() {
        let mut doc = empty_game_value();
        doc["locations"]["start"]["exits"] = json!({"up": 7});
        assert_eq!(
            validate_value(&doc),
            vec![wrong_type(
                Scope::Location("start".into()),
                "exits.up",
                JsonKind::String
            )]
        );
    }

    #[test]
    fn errors_accumulate_in_document_order() {
        let mut doc = empty_game_value();
        doc["start_location"] = json!("gone");
        doc["locations"]["start"]["exits"] = json!({"east": "x", "west": "y"});
        doc["player"]["current_location"] = json!("also_gone");

        let errors = validate_value(&doc);
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationError::UnknownStartLocation { .. }));
        assert!(
            matches!(&errors[1], ValidationError::DanglingExit { direction, .. } if direction == "east")
        );
        assert!(
            matches!(&errors[2], ValidationError::DanglingExit { direction, .. } if direction == "west")
        );
        assert!(matches!(errors[3], ValidationError::UnknownPlayerLocation { .. }));
    }

    #[test]
    fn item_references_unchecked_by_default() {
        let mut game = create_empty_game();
        game.locations["start"].items.push("phantom".into());
        game.player.inventory.push("ghost".into());
        assert!(validate(&game).is_empty());
    }

    #[test]
    fn strict_options_report_unknown_items() {
        let mut game = create_empty_game();
        let (key_id, key) = create_item("key", "Key", "A key.").into_entry();
        game.inventory_items.insert(key_id, key);
        game.locations["start"].items.extend(["key".to_string(), "phantom".to_string()]);
        game.player.inventory.push("ghost".into());

        let expected = vec![
            ValidationError::UnknownLocationItem {
                location: "start".into(),
                item: "phantom".into(),
            },
            ValidationError::UnknownInventoryItem {
                item: "ghost".into(),
            },
        ];
        let strict = ValidationOptions::strict();
        assert_eq!(validate_with(&game, &strict), expected);

        let value = serde_json::to_value(&game).unwrap();
        assert_eq!(validate_value_with(&value, &strict), expected);
    }

    #[test]
    fn validation_does_not_mutate() {
        let mut doc = empty_game_value();
        doc["locations"]["start"]["exits"] = json!({"down": "void"});
        let before = doc.clone();
        let _ = validate_value(&doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn messages_carry_identifiers() {
        let error = ValidationError::DanglingExit {
            location: "hall".into(),
            direction: "north".into(),
            target: "yard".into(),
        };
        let message = error.to_string();
        assert!(message.contains("hall"));
        assert!(message.contains("north"));
        assert!(message.contains("yard"));

        let missing = ValidationError::MissingKey {
            scope: Scope::Location("hall".into()),
            key: "exits",
        };
        assert_eq!(
            missing.to_string(),
            "location 'hall' is missing required key 'exits'"
        );
    }
}
