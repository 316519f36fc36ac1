use super::*;

use crate::internal;
use crate::LatticeError;

use std::collections::HashSet;

//-----------------------------------------------------------------------------

fn bits(universe: usize, indices: &[usize]) -> BitSet {
    BitSet::from_indices(universe, indices.iter().copied()).unwrap()
}

fn check_extents(lattice: &ConceptLattice, intents: &[BitSet], name: &str) {
    for concept in lattice.concepts() {
        let expected = internal::extent_of(intents, concept.intent());
        assert_eq!(concept.extent(), &expected, "Wrong extent for intent {} for {}", concept.intent(), name);
    }
}

fn check_concepts(lattice: &ConceptLattice, intents: &[BitSet], name: &str) {
    let expected = internal::closed_intents(intents, lattice.attributes());
    let found: HashSet<BitSet> = lattice.concepts().map(|concept| concept.intent().clone()).collect();
    assert_eq!(lattice.len(), found.len(), "Duplicate intents for {}", name);
    assert_eq!(found, expected, "Wrong intents for {}", name);
    check_extents(lattice, intents, name);
    internal::check_covering(lattice.lattice(), name);
}

//-----------------------------------------------------------------------------

#[test]
fn scenario() {
    let mut lattice = ConceptLattice::new(3);
    let first = lattice.insert_object(0, bits(3, &[0, 1])).unwrap();
    let second = lattice.insert_object(1, bits(3, &[0])).unwrap();

    let top = lattice.lattice().top();
    let top_concept = lattice.lattice().label(top).unwrap();
    assert!(top_concept.intent().is_empty(), "Top intent is not empty");
    assert_eq!(top_concept.extent(), &bits(2, &[0, 1]), "Wrong extent for the top");

    let general = lattice.lattice().label(second).unwrap();
    assert_eq!(general.intent(), &bits(3, &[0]), "Wrong intent for {{a}}");
    assert_eq!(general.extent(), &bits(2, &[0, 1]), "Wrong extent for {{a}}");

    let specific = lattice.lattice().label(first).unwrap();
    assert_eq!(specific.intent(), &bits(3, &[0, 1]), "Wrong intent for {{a, b}}");
    assert_eq!(specific.extent(), &bits(1, &[0]), "Wrong extent for {{a, b}}");
    assert_eq!(lattice.lattice().bottom(), first, "Wrong bottom");

    assert_eq!(lattice.support(&bits(3, &[0])), 2, "Wrong support for {{a}}");
    assert_eq!(lattice.support(&bits(3, &[0, 1])), 1, "Wrong support for {{a, b}}");
    assert_eq!(lattice.support(&bits(3, &[1])), 1, "Wrong support for {{b}}");
    assert_eq!(lattice.support(&bits(3, &[2])), 0, "Wrong support for {{c}}");
    assert_eq!(lattice.support(&BitSet::new()), 2, "Wrong support for the empty intent");
}

#[test]
fn closures() {
    let attributes = 5;
    let mut rng = internal::rng(0x5EED);
    let intents = internal::random_intents(&mut rng, 10, attributes, 0.4);
    let mut lattice = ConceptLattice::new(attributes);
    for (object, intent) in intents.iter().enumerate() {
        lattice.insert_object(object, intent.clone()).unwrap();
    }

    for mask in 0..(1usize << attributes) {
        let query = BitSet::from_indices(attributes, (0..attributes).filter(|i| mask & (1 << i) != 0)).unwrap();
        let extent = internal::extent_of(&intents, &query);
        let found = lattice.concept_of(&query);
        if extent.is_empty() {
            assert!(found.is_none(), "Concept for {} without objects", query);
            continue;
        }
        let mut closure = BitSet::from_indices(attributes, 0..attributes).unwrap();
        for object in extent.iter() {
            closure = closure.intersection(&intents[object]);
        }
        let concept = found.unwrap();
        assert!(query.is_subset(concept.intent()), "Concept for {} does not contain the query", query);
        assert_eq!(concept.intent(), &closure, "Wrong closure for {}", query);
        assert_eq!(concept.extent(), &extent, "Wrong extent for the closure of {}", query);
    }
}

#[test]
fn incompatible_intent() {
    let mut lattice = ConceptLattice::new(3);
    let result = lattice.insert_object(0, bits(4, &[3]));
    assert!(matches!(result, Err(LatticeError::Incompatible(_))), "Intent over another universe was accepted");
    assert!(lattice.is_empty(), "Rejected intent changed the lattice");
}

#[test]
fn repeated_intents() {
    let mut lattice = ConceptLattice::new(4);
    let intents = vec![bits(4, &[0, 1]), bits(4, &[1, 2]), bits(4, &[0, 1])];
    let first = lattice.insert_object(0, intents[0].clone()).unwrap();
    lattice.insert_object(1, intents[1].clone()).unwrap();
    let (size, order) = (lattice.len(), lattice.lattice().edges());

    let again = lattice.insert_object(2, intents[2].clone()).unwrap();
    assert_eq!(first, again, "Repeated intent got a new vertex");
    assert_eq!(lattice.len(), size, "Repeated intent created concepts");
    assert_eq!(lattice.lattice().edges(), order, "Repeated intent changed the edges");
    assert_eq!(lattice.lattice().label(again).unwrap().extent(), &bits(3, &[0, 2]), "Wrong extent for a repeated intent");
    check_concepts(&lattice, &intents, "repeated");
}

#[test]
fn extents_after_every_insertion() {
    for seed in 0..6 {
        let mut rng = internal::rng(seed);
        let attributes = 7;
        let intents = internal::random_intents(&mut rng, 15, attributes, 0.4);
        let mut lattice = ConceptLattice::new(attributes);
        for (object, intent) in intents.iter().enumerate() {
            let result = lattice.insert_object(object, intent.clone());
            assert!(result.is_ok(), "Failed to insert object {} with seed {}: {}", object, seed, result.unwrap_err());
            let name = format!("seed {} after object {}", seed, object);
            check_extents(&lattice, &intents[..=object], &name);
        }
        check_concepts(&lattice, &intents, &format!("seed {}", seed));
    }
}

#[test]
fn dense_and_sparse_contexts() {
    let mut rng = internal::rng(42);
    for (i, density) in [0.1, 0.9].into_iter().enumerate() {
        let attributes = 5;
        let intents = internal::random_intents(&mut rng, 20, attributes, density);
        let mut lattice = ConceptLattice::new(attributes);
        for (object, intent) in intents.iter().enumerate() {
            lattice.insert_object(object, intent.clone()).unwrap();
        }
        check_concepts(&lattice, &intents, &format!("density {}", i));
    }
}

#[test]
fn support_matches_brute_force() {
    let mut rng = internal::rng(7);
    let attributes = 6;
    let intents = internal::random_intents(&mut rng, 25, attributes, 0.5);
    let mut lattice = ConceptLattice::new(attributes);
    for (object, intent) in intents.iter().enumerate() {
        lattice.insert_object(object, intent.clone()).unwrap();
    }
    for query in internal::random_intents(&mut rng, 30, attributes, 0.3) {
        let expected = internal::extent_of(&intents, &query).count();
        assert_eq!(lattice.support(&query), expected, "Wrong support for {}", query);
    }
}

//-----------------------------------------------------------------------------

#[test]
fn interval_lattice() {
    let mut lattice = IntervalLattice::default();
    assert!(lattice.is_empty(), "New interval lattice is not empty");
    lattice.insert(Interval::new(0, 0..100)).unwrap();
    lattice.insert(Interval::new(0, 40..60)).unwrap();
    lattice.insert(Interval::new(0, 50..80)).unwrap();
    lattice.insert(Interval::new(3, 5..10)).unwrap();

    let found: HashSet<String> = lattice.intervals().map(|interval| interval.to_string()).collect();
    let expected: HashSet<String> = ["empty", "0:0-100", "0:40-60", "0:50-80", "0:50-60", "3:5-10"]
        .iter().map(|s| s.to_string()).collect();
    assert_eq!(found, expected, "Wrong intervals");

    assert_eq!(lattice.enclosing(&Interval::new(0, 52..55)), Some(&Interval::new(0, 50..60)), "Wrong enclosing interval in the overlap");
    assert_eq!(lattice.enclosing(&Interval::new(0, 45..55)), Some(&Interval::new(0, 40..60)), "Wrong enclosing interval");
    assert_eq!(lattice.enclosing(&Interval::new(0, 10..20)), Some(&Interval::new(0, 0..100)), "Wrong enclosing interval for the outer interval");
    assert_eq!(lattice.enclosing(&Interval::new(0, 90..110)), None, "Interval outside the stored ones");
    assert_eq!(lattice.enclosing(&Interval::new(3, 6..7)), Some(&Interval::new(3, 5..10)), "Wrong enclosing interval on another dimension");
    internal::check_covering(lattice.lattice(), "intervals");
}

#[test]
fn set_lattice() {
    let mut lattice = SetLattice::new(4);
    lattice.insert_items([0, 1, 2]).unwrap();
    lattice.insert_items([1, 2, 3]).unwrap();
    lattice.insert(Poset::from_items(4, [2, 3]).unwrap()).unwrap();
    assert!(matches!(lattice.insert_items([4]), Err(LatticeError::OutOfUniverse { index: 4, universe: 4 })), "Item outside the universe was accepted");

    let found: HashSet<BitSet> = lattice.sets().map(|set| set.items().clone()).collect();
    let expected: HashSet<BitSet> = [vec![], vec![0, 1, 2], vec![1, 2, 3], vec![1, 2], vec![2, 3], vec![2]]
        .iter().map(|items| bits(4, items)).collect();
    assert_eq!(found, expected, "Wrong sets");
    assert_eq!(lattice.len(), expected.len(), "Duplicate sets");

    let query = Poset::from_items(4, [1]).unwrap();
    assert_eq!(lattice.closure(&query).map(|set| set.items()), Some(&bits(4, &[1, 2])), "Wrong closure");
    internal::check_covering(lattice.lattice(), "sets");
}

//-----------------------------------------------------------------------------
