// Shared helpers for tests: random contexts and brute-force oracles for lattice invariants.

use crate::{BitSet, Lattice, PartialOrder, VertexId};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::collections::HashSet;

//-----------------------------------------------------------------------------

// Random contexts.

pub(crate) fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// Each attribute is set with the given probability.
pub(crate) fn random_intent(rng: &mut StdRng, attributes: usize, density: f64) -> BitSet {
    let indices: Vec<usize> = (0..attributes).filter(|_| rng.gen_bool(density)).collect();
    BitSet::from_indices(attributes, indices).unwrap()
}

pub(crate) fn random_intents(rng: &mut StdRng, objects: usize, attributes: usize, density: f64) -> Vec<BitSet> {
    (0..objects).map(|_| random_intent(rng, attributes, density)).collect()
}

//-----------------------------------------------------------------------------

// Brute-force oracles.

// The empty intent and every intersection of a non-empty subset of the intents.
pub(crate) fn closed_intents(intents: &[BitSet], attributes: usize) -> HashSet<BitSet> {
    let mut result: HashSet<BitSet> = HashSet::new();
    result.insert(BitSet::with_len(attributes));
    for intent in intents {
        let generated: Vec<BitSet> = result.iter().map(|existing| existing.intersection(intent)).collect();
        result.extend(generated);
        result.insert(intent.clone());
    }
    result
}

// Objects whose intents contain the given intent.
pub(crate) fn extent_of(intents: &[BitSet], intent: &BitSet) -> BitSet {
    let mut result = BitSet::with_len(intents.len());
    for (object, object_intent) in intents.iter().enumerate() {
        if intent.is_subset(object_intent) {
            result.insert(object);
        }
    }
    result
}

// Checks that the edges of the lattice are exactly the covering pairs of its labels.
pub(crate) fn check_covering<T: PartialOrder>(lattice: &Lattice<T>, name: &str) {
    let graph = lattice.graph();
    let ids: Vec<VertexId> = graph.vertex_ids().collect();
    let covers = |low: &T, high: &T| {
        lattice.strictly_dominates(high, low) && !ids.iter().any(|&z| {
            let middle = graph[z].label();
            lattice.strictly_dominates(middle, low) && lattice.strictly_dominates(high, middle)
        })
    };
    for (i, &x) in ids.iter().enumerate() {
        for &y in ids.iter().skip(i + 1) {
            let (x_label, y_label) = (graph[x].label(), graph[y].label());
            assert!(!lattice.dominates(x_label, y_label) || !lattice.dominates(y_label, x_label), "Duplicate labels at vertices {} and {} for {}", x, y, name);
            let expected = covers(x_label, y_label) || covers(y_label, x_label);
            assert_eq!(graph.has_edge(x, y), expected, "Wrong edge status from vertex {} to vertex {} for {}", x, y, name);
            assert_eq!(graph.has_edge(y, x), expected, "Wrong edge status from vertex {} to vertex {} for {}", y, x, name);
        }
    }
}

// Checks that the labels are closed under generalization.
pub(crate) fn check_closure<T: PartialOrder>(lattice: &Lattice<T>, name: &str) {
    let labels: Vec<&T> = lattice.labels().collect();
    for x in labels.iter() {
        for y in labels.iter() {
            if let Some(generalized) = lattice.generalize(x, y) {
                let found = labels.iter().any(|label| generalized.relation(label) == crate::Relation::Equal);
                assert!(found, "Missing generalization of {:?} and {:?} for {}", x, y, name);
            }
        }
    }
}

//-----------------------------------------------------------------------------
