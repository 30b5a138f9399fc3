use crate::data_wrappers::{Candidate, Edge};
use crate::union_find::UnionFind;
use crate::EmstError;
use num_traits::Float;

/// Per component candidate edges for one Boruvka round, indexed by component id (the
/// union-find root of the component).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CandidateTable<T> {
    entries: Vec<Option<Candidate<T>>>,
}

impl<T: Float> CandidateTable<T> {
    pub(crate) fn new(n_samples: usize) -> Self {
        CandidateTable {
            entries: vec![None; n_samples],
        }
    }

    pub(crate) fn reset(&mut self) {
        self.entries.iter_mut().for_each(|entry| *entry = None);
    }

    /// Offers the edge `owner -> neighbour` to `component`, where `owner` lies inside the
    /// component and `neighbour` outside. Returns whether it replaced the current candidate.
    pub(crate) fn update(
        &mut self,
        component: usize,
        owner: usize,
        neighbour: usize,
        distance: T,
    ) -> bool {
        self.offer(
            component,
            Candidate {
                owner,
                neighbour,
                distance,
            },
        )
    }

    pub(crate) fn offer(&mut self, component: usize, candidate: Candidate<T>) -> bool {
        let replace = match &self.entries[component] {
            Some(current) => candidate.precedes(current),
            None => true,
        };
        if replace {
            self.entries[component] = Some(candidate);
        }
        replace
    }

    pub(crate) fn get(&self, component: usize) -> Option<&Candidate<T>> {
        self.entries[component].as_ref()
    }

    /// Distance of the component's candidate, or infinity while it has none.
    pub(crate) fn distance(&self, component: usize) -> T {
        self.entries[component]
            .map(|candidate| candidate.distance)
            .unwrap_or(T::infinity())
    }

    /// Keeps, per component, whichever of the two tables holds the preceding candidate.
    pub(crate) fn merge(&mut self, other: &CandidateTable<T>) {
        for (component, entry) in other.entries.iter().enumerate() {
            if let Some(candidate) = entry {
                self.offer(component, *candidate);
            }
        }
    }
}

/// Tracks which component every point belongs to, together with the candidate edges of the
/// current round.
#[derive(Debug, Clone)]
pub(crate) struct ComponentTracker<T> {
    union_find: UnionFind,
    membership: Vec<usize>,
    candidates: CandidateTable<T>,
    n_components: usize,
}

impl<T: Float> ComponentTracker<T> {
    /// Every point starts out as its own component.
    pub(crate) fn new(n_samples: usize) -> Self {
        ComponentTracker {
            union_find: UnionFind::new(n_samples),
            membership: (0..n_samples).collect(),
            candidates: CandidateTable::new(n_samples),
            n_components: n_samples,
        }
    }

    pub(crate) fn find(&mut self, point: usize) -> usize {
        self.union_find.find(point)
    }

    /// Merges the components of `a` and `b` and returns the id of the merged component.
    pub(crate) fn union(&mut self, a: usize, b: usize) -> usize {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a != root_b {
            self.n_components -= 1;
        }
        self.union_find.union(root_a, root_b)
    }

    /// Clears all candidates and snapshots the component of every point. Components do not
    /// change during a round, so the snapshot stays valid until the merge step.
    pub(crate) fn reset_round(&mut self) {
        self.candidates.reset();
        for point in 0..self.union_find.len() {
            self.membership[point] = self.union_find.find(point);
        }
    }

    pub(crate) fn update_candidate(
        &mut self,
        component: usize,
        owner: usize,
        other_point: usize,
        distance: T,
    ) -> bool {
        self.candidates.update(component, owner, other_point, distance)
    }

    /// Component of every point, as of the last call to `reset_round`.
    pub(crate) fn membership(&self) -> &[usize] {
        &self.membership
    }

    /// Splits the tracker into the membership snapshot and the candidate table, so a search
    /// can read the one while filling the other.
    pub(crate) fn round_state(&mut self) -> (&[usize], &mut CandidateTable<T>) {
        (&self.membership, &mut self.candidates)
    }

    #[cfg(test)]
    pub(crate) fn candidates(&self) -> &CandidateTable<T> {
        &self.candidates
    }

    pub(crate) fn n_components(&self) -> usize {
        self.n_components
    }

    /// The candidate edge of every component, each unordered pair reported once even when
    /// both of its components discovered it.
    ///
    /// # Returns
    /// * The edges sorted by endpoints, or an error if any component ended the round without
    ///   a candidate while more than one component remains.
    pub(crate) fn round_edges(&self) -> Result<Vec<Edge<T>>, EmstError> {
        let mut edges = Vec::with_capacity(self.n_components);
        for (point, &component) in self.membership.iter().enumerate() {
            if point != component {
                continue;
            }
            match self.candidates.get(component) {
                Some(candidate) => edges.push(candidate.to_edge()),
                None => {
                    return Err(EmstError::InvariantViolation(format!(
                        "component {component} found no candidate edge while {} components remain",
                        self.n_components
                    )))
                }
            }
        }
        edges.sort_by_key(|edge| (edge.point_a, edge.point_b));
        edges.dedup_by_key(|edge| (edge.point_a, edge.point_b));
        Ok(edges)
    }
}
