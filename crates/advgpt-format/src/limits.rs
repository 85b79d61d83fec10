//! Capacity lint against the fixed-size tables of the companion game engine.
//!
//! The engine stores games in fixed arrays and silently drops whatever does
//! not fit. This lint reports those cases ahead of time. It is advisory: it is
//! not part of [`crate::validation`] and never blocks saving or loading.

use std::fmt;

use crate::schema::{FlagMap, GameDocument};

/// Capacities of the engine's game tables. String limits are in bytes and
/// include the terminating NUL, so the usable length is one less.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    pub max_locations: usize,
    pub max_item_definitions: usize,
    pub max_exits: usize,
    pub max_items_per_location: usize,
    pub max_flags: usize,
    pub max_inventory: usize,
    pub id_bytes: usize,
    pub direction_bytes: usize,
    pub string_bytes: usize,
    pub description_bytes: usize,
    pub version_bytes: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_locations: 256,
            max_item_definitions: 64,
            max_exits: 8,
            max_items_per_location: 32,
            max_flags: 128,
            max_inventory: 64,
            id_bytes: 64,
            direction_bytes: 32,
            string_bytes: 256,
            description_bytes: 1024,
            version_bytes: 32,
        }
    }
}

/// One capacity the document exceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitWarning {
    /// What was measured, e.g. `location 'hall' exits`.
    pub subject: String,
    pub actual: usize,
    /// Largest value the engine keeps.
    pub max: usize,
}

impl fmt::Display for LimitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is {} but the engine keeps at most {}",
            self.subject, self.actual, self.max
        )
    }
}

struct Lint<'a> {
    limits: &'a EngineLimits,
    warnings: Vec<LimitWarning>,
}

impl Lint<'_> {
    fn count(&mut self, subject: impl fmt::Display, actual: usize, max: usize) {
        if actual > max {
            self.warnings.push(LimitWarning {
                subject: subject.to_string(),
                actual,
                max,
            });
        }
    }

    /// `buffer` is the C buffer size; one byte goes to the terminator.
    fn text(&mut self, subject: impl fmt::Display, value: &str, buffer: usize) {
        self.count(
            format_args!("{subject} length"),
            value.len(),
            buffer.saturating_sub(1),
        );
    }

    fn id(&mut self, subject: impl fmt::Display, id: &str) {
        self.text(subject, id, self.limits.id_bytes);
    }

    fn flags(&mut self, subject: impl fmt::Display, flags: &FlagMap) {
        self.count(format_args!("{subject} count"), flags.len(), self.limits.max_flags);
        for name in flags.keys() {
            self.id(format_args!("flag '{name}' name"), name);
        }
    }
}

/// Check a document against the engine's capacities.
pub fn check_engine_limits(doc: &GameDocument, limits: &EngineLimits) -> Vec<LimitWarning> {
    let mut lint = Lint {
        limits,
        warnings: Vec::new(),
    };

    let meta = &doc.meta;
    lint.text("meta title", &meta.title, limits.string_bytes);
    lint.text("meta author", &meta.author, limits.string_bytes);
    lint.text("meta description", &meta.description, limits.description_bytes);
    lint.text("meta version", &meta.version, limits.version_bytes);
    lint.id("start_location", &doc.start_location);

    lint.count("location count", doc.locations.len(), limits.max_locations);
    for (id, location) in &doc.locations {
        lint.id(format_args!("location '{id}' id"), id);
        lint.text(
            format_args!("location '{id}' title"),
            &location.title,
            limits.string_bytes,
        );
        lint.text(
            format_args!("location '{id}' description"),
            &location.description,
            limits.description_bytes,
        );
        lint.text(
            format_args!("location '{id}' image"),
            &location.image,
            limits.string_bytes,
        );
        lint.text(
            format_args!("location '{id}' first_visit_text"),
            &location.first_visit_text,
            limits.description_bytes,
        );

        lint.count(
            format_args!("location '{id}' exit count"),
            location.exits.len(),
            limits.max_exits,
        );
        for (direction, target) in &location.exits {
            lint.text(
                format_args!("location '{id}' direction '{direction}'"),
                direction,
                limits.direction_bytes,
            );
            lint.id(format_args!("location '{id}' exit '{direction}' target"), target);
        }

        lint.count(
            format_args!("location '{id}' item count"),
            location.items.len(),
            limits.max_items_per_location,
        );
        lint.flags(format_args!("location '{id}' flags_required"), &location.flags_required);
        lint.flags(format_args!("location '{id}' flags_set"), &location.flags_set);
    }

    lint.count(
        "item definition count",
        doc.inventory_items.len(),
        limits.max_item_definitions,
    );
    for (id, item) in &doc.inventory_items {
        lint.id(format_args!("item '{id}' id"), id);
        lint.text(format_args!("item '{id}' name"), &item.name, limits.string_bytes);
        lint.text(
            format_args!("item '{id}' description"),
            &item.description,
            limits.description_bytes,
        );
        lint.text(
            format_args!("item '{id}' use_text"),
            &item.use_text,
            limits.description_bytes,
        );
    }

    lint.count("game flag count", doc.game_flags.len(), limits.max_flags);
    lint.count(
        "player inventory count",
        doc.player.inventory.len(),
        limits.max_inventory,
    );
    lint.count("player flag count", doc.player.flags.len(), limits.max_flags);

    lint.warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{create_empty_game, create_location};

    #[test]
    fn empty_game_fits() {
        assert!(check_engine_limits(&create_empty_game(), &EngineLimits::default()).is_empty());
    }

    #[test]
    fn too_many_exits() {
        let mut game = create_empty_game();
        let start = &mut game.locations["start"];
        for n in 0..9 {
            start.exits.insert(format!("dir{n}"), "start".into());
        }
        let warnings = check_engine_limits(&game, &EngineLimits::default());
        assert_eq!(
            warnings,
            vec![LimitWarning {
                subject: "location 'start' exit count".into(),
                actual: 9,
                max: 8,
            }]
        );
    }

    #[test]
    fn string_limit_leaves_room_for_terminator() {
        let mut game = create_empty_game();
        game.meta.version = "x".repeat(31);
        assert!(check_engine_limits(&game, &EngineLimits::default()).is_empty());

        game.meta.version.push('x');
        let warnings = check_engine_limits(&game, &EngineLimits::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].subject, "meta version length");
        assert_eq!(warnings[0].actual, 32);
        assert_eq!(warnings[0].max, 31);
    }

    #[test]
    fn long_location_id_reported_everywhere_it_appears() {
        let long_id = "l".repeat(70);
        let mut game = create_empty_game();
        let loc = create_location(long_id.as_str(), "Far", "far").build();
        game.locations.insert(long_id.clone(), loc);
        game.locations["start"]
            .exits
            .insert("east".into(), long_id.clone());

        let subjects: Vec<String> = check_engine_limits(&game, &EngineLimits::default())
            .into_iter()
            .map(|w| w.subject)
            .collect();
        assert_eq!(
            subjects,
            vec![
                "location 'start' exit 'east' target length".to_string(),
                format!("location '{long_id}' id length"),
            ]
        );
    }

    #[test]
    fn custom_limits() {
        let limits = EngineLimits {
            max_locations: 0,
            ..EngineLimits::default()
        };
        let warnings = check_engine_limits(&create_empty_game(), &limits);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].to_string(), "location count is 1 but the engine keeps at most 0");
    }
}
