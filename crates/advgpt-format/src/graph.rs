//! Queries over the location graph formed by exits.

use std::collections::{HashSet, VecDeque};

use crate::schema::GameDocument;

/// Identifiers of the locations reachable from `from` by following exits,
/// including `from` itself, in breadth-first order. Dangling exits are
/// skipped.
pub fn reachable_from<'a>(doc: &'a GameDocument, from: &'a str) -> Vec<&'a str> {
    let mut order = Vec::new();
    if !doc.contains_location(from) {
        return order;
    }

    let mut seen: HashSet<&str> = HashSet::from([from]);
    let mut queue = VecDeque::from([from]);
    while let Some(id) = queue.pop_front() {
        order.push(id);
        let Some(location) = doc.location(id) else {
            continue;
        };
        for target in location.exits.values() {
            if doc.contains_location(target) && seen.insert(target.as_str()) {
                queue.push_back(target.as_str());
            }
        }
    }
    order
}

/// Locations the player can never walk to from the start location, in
/// document order.
pub fn unreachable_locations(doc: &GameDocument) -> Vec<&str> {
    let reachable: HashSet<&str> = reachable_from(doc, &doc.start_location)
        .into_iter()
        .collect();
    doc.locations
        .keys()
        .map(String::as_str)
        .filter(|id| !reachable.contains(id))
        .collect()
}
