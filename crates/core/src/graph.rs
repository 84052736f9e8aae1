//! Relationship path finding over the combined descent + spouse graph.
//!
//! [`FamilyGraph`] turns one snapshot of person records into an explicit
//! adjacency list whose edges are tagged with the hop they represent from the
//! owning node's point of view. A breadth-first search over it yields the
//! shortest relationship path (in hops) between two people.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::person::PersonRecord;
use crate::types::PersonId;

/// How a path step was reached from the previous person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hop {
    /// First segment of every path.
    Start,
    /// The current person is the previous person's parent.
    Parent,
    /// The current person is the previous person's child.
    Child,
    /// The current person is the previous person's spouse.
    Spouse,
}

/// One person on a relationship path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSegment {
    pub person_id: PersonId,
    pub person_name: String,
    pub relationship: Hop,
}

/// Adjacency view of a record snapshot.
pub struct FamilyGraph<'a> {
    records: &'a [PersonRecord],
    by_id: HashMap<&'a str, usize>,
    /// Outgoing `(neighbor, hop)` pairs per node, in discovery order.
    adjacency: Vec<Vec<(usize, Hop)>>,
}

impl<'a> FamilyGraph<'a> {
    /// Build the graph. Dangling parent/spouse references are skipped.
    pub fn from_records(records: &'a [PersonRecord]) -> Result<Self, CoreError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if by_id.insert(record.id.as_str(), idx).is_some() {
                return Err(CoreError::CorruptTree(format!(
                    "Duplicate person id '{}'",
                    record.id
                )));
            }
        }

        let mut adjacency = vec![Vec::new(); records.len()];
        let mut spouse_pairs: HashSet<(usize, usize)> = HashSet::new();

        for (idx, record) in records.iter().enumerate() {
            if let Some(parent) = record.parent_id().and_then(|p| by_id.get(p).copied()) {
                adjacency[idx].push((parent, Hop::Parent));
                adjacency[parent].push((idx, Hop::Child));
            }

            if let Some(spouse) = record.spouse_id.as_deref().and_then(|s| by_id.get(s).copied()) {
                // One edge per unordered pair, whichever side is seen first.
                let pair = (idx.min(spouse), idx.max(spouse));
                if spouse != idx && spouse_pairs.insert(pair) {
                    adjacency[idx].push((spouse, Hop::Spouse));
                    adjacency[spouse].push((idx, Hop::Spouse));
                }
            }
        }

        Ok(Self {
            records,
            by_id,
            adjacency,
        })
    }

    pub fn node_count(&self) -> usize {
        self.records.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Tagged neighbors of `id`, or `None` if the id is unknown.
    pub fn neighbors(&self, id: &str) -> Option<Vec<(&'a str, Hop)>> {
        let idx = *self.by_id.get(id)?;
        Some(
            self.adjacency[idx]
                .iter()
                .map(|&(n, hop)| (self.records[n].id.as_str(), hop))
                .collect(),
        )
    }

    /// Shortest path from `start_id` to `end_id`, or `None` if unconnected.
    ///
    /// A query from a person to themselves returns the single `start` segment.
    pub fn shortest_path(
        &self,
        start_id: &str,
        end_id: &str,
    ) -> Result<Option<Vec<PathSegment>>, CoreError> {
        let start = self.index_of(start_id)?;
        let end = self.index_of(end_id)?;

        let mut came_from: HashMap<usize, (usize, Hop)> = HashMap::new();
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            if current == end {
                return Ok(Some(self.reconstruct(start, end, &came_from)));
            }
            for &(next, hop) in &self.adjacency[current] {
                if visited.insert(next) {
                    came_from.insert(next, (current, hop));
                    queue.push_back(next);
                }
            }
        }

        Ok(None)
    }

    fn index_of(&self, id: &str) -> Result<usize, CoreError> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| CoreError::person_not_found(id))
    }

    fn segment(&self, idx: usize, hop: Hop) -> PathSegment {
        let record = &self.records[idx];
        PathSegment {
            person_id: record.id.clone(),
            person_name: record.details.name.clone(),
            relationship: hop,
        }
    }

    fn reconstruct(
        &self,
        start: usize,
        end: usize,
        came_from: &HashMap<usize, (usize, Hop)>,
    ) -> Vec<PathSegment> {
        let mut path = Vec::new();
        let mut current = end;
        while current != start {
            let (previous, hop) = came_from[&current];
            path.push(self.segment(current, hop));
            current = previous;
        }
        path.push(self.segment(start, Hop::Start));
        path.reverse();
        path
    }
}

/// Build a graph over `records` and search it once.
pub fn find_path(
    records: &[PersonRecord],
    start_id: &str,
    end_id: &str,
) -> Result<Option<Vec<PathSegment>>, CoreError> {
    FamilyGraph::from_records(records)?.shortest_path(start_id, end_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{Gender, PersonDetails, Placement};
    use crate::types::Date;
    use assert_matches::assert_matches;

    fn person(id: &str, placement: Placement) -> PersonRecord {
        PersonRecord::new(
            id,
            PersonDetails {
                name: id.to_uppercase(),
                gender: Gender::Other,
                birth_date: Date::from_ymd_opt(1950, 6, 15).unwrap(),
                death_date: None,
            },
            placement,
        )
    }

    fn child_of(id: &str, parent: &str) -> PersonRecord {
        person(id, Placement::ChildOf(parent.into()))
    }

    fn marry(records: &mut [PersonRecord], a: &str, b: &str) {
        for r in records.iter_mut() {
            if r.id == a {
                r.spouse_id = Some(b.into());
            } else if r.id == b {
                r.spouse_id = Some(a.into());
            }
        }
    }

    fn hops(path: &[PathSegment]) -> Vec<(&str, Hop)> {
        path.iter()
            .map(|s| (s.person_id.as_str(), s.relationship))
            .collect()
    }

    #[test]
    fn test_parent_child_spouse_chain() {
        // A is B's parent; B is married to C.
        let mut records = vec![
            person("a", Placement::Root),
            child_of("b", "a"),
            person("c", Placement::SpouseOnly),
        ];
        marry(&mut records, "b", "c");

        let path = find_path(&records, "a", "c").unwrap().unwrap();
        assert_eq!(
            hops(&path),
            vec![("a", Hop::Start), ("b", Hop::Child), ("c", Hop::Spouse)]
        );
        assert_eq!(path[2].person_name, "C");

        let back = find_path(&records, "c", "a").unwrap().unwrap();
        assert_eq!(
            hops(&back),
            vec![("c", Hop::Start), ("b", Hop::Spouse), ("a", Hop::Parent)]
        );
    }

    #[test]
    fn test_siblings_route_through_parent() {
        let records = vec![
            person("p", Placement::Root),
            child_of("x", "p"),
            child_of("y", "p"),
        ];
        let path = find_path(&records, "x", "y").unwrap().unwrap();
        assert_eq!(
            hops(&path),
            vec![("x", Hop::Start), ("p", Hop::Parent), ("y", Hop::Child)]
        );
    }

    #[test]
    fn test_shortest_route_is_preferred() {
        // Long route a -> b -> c -> d, shortcut a -spouse- d.
        let mut records = vec![
            person("a", Placement::Root),
            child_of("b", "a"),
            child_of("c", "b"),
            person("d", Placement::SpouseOnly),
        ];
        marry(&mut records, "a", "d");
        let path = find_path(&records, "c", "d").unwrap().unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(
            hops(&path),
            vec![
                ("c", Hop::Start),
                ("b", Hop::Parent),
                ("a", Hop::Parent),
                ("d", Hop::Spouse)
            ]
        );
    }

    #[test]
    fn test_disconnected_people_have_no_path() {
        let records = vec![person("a", Placement::Root), person("z", Placement::Root)];
        assert_eq!(find_path(&records, "a", "z").unwrap(), None);
    }

    #[test]
    fn test_self_path_is_single_start_segment() {
        let records = vec![person("a", Placement::Root)];
        let path = find_path(&records, "a", "a").unwrap().unwrap();
        assert_eq!(hops(&path), vec![("a", Hop::Start)]);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let records = vec![person("a", Placement::Root)];
        assert_matches!(
            find_path(&records, "a", "nope"),
            Err(CoreError::NotFound { id, .. }) if id == "nope"
        );
        assert_matches!(
            find_path(&records, "nope", "a"),
            Err(CoreError::NotFound { .. })
        );
    }

    #[test]
    fn test_spouse_pairs_add_one_edge() {
        let mut records = vec![person("a", Placement::Root), person("b", Placement::SpouseOnly)];
        marry(&mut records, "a", "b");
        let graph = FamilyGraph::from_records(&records).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors("a").unwrap(), vec![("b", Hop::Spouse)]);
        assert_eq!(graph.neighbors("b").unwrap(), vec![("a", Hop::Spouse)]);
    }

    #[test]
    fn test_one_sided_spouse_link_is_still_traversable() {
        let mut a = person("a", Placement::Root);
        a.spouse_id = Some("b".into());
        let records = vec![a, person("b", Placement::SpouseOnly)];
        let graph = FamilyGraph::from_records(&records).unwrap();
        assert_eq!(graph.edge_count(), 1);

        let path = graph.shortest_path("b", "a").unwrap().unwrap();
        assert_eq!(hops(&path), vec![("b", Hop::Start), ("a", Hop::Spouse)]);
    }

    #[test]
    fn test_dangling_references_are_skipped() {
        let mut a = person("a", Placement::Root);
        a.spouse_id = Some("ghost".into());
        let records = vec![a, child_of("b", "missing")];
        let graph = FamilyGraph::from_records(&records).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.shortest_path("a", "b").unwrap(), None);
    }

    #[test]
    fn test_parent_edges_are_tagged_from_both_sides() {
        let records = vec![person("p", Placement::Root), child_of("c", "p")];
        let graph = FamilyGraph::from_records(&records).unwrap();
        assert_eq!(graph.neighbors("c").unwrap(), vec![("p", Hop::Parent)]);
        assert_eq!(graph.neighbors("p").unwrap(), vec![("c", Hop::Child)]);
        assert!(graph.neighbors("zzz").is_none());
    }

    #[test]
    fn test_segment_serialization() {
        let records = vec![person("p", Placement::Root), child_of("c", "p")];
        let path = find_path(&records, "p", "c").unwrap().unwrap();
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json[0]["personId"], "p");
        assert_eq!(json[0]["relationship"], "start");
        assert_eq!(json[1]["personName"], "C");
        assert_eq!(json[1]["relationship"], "child");
    }
}
