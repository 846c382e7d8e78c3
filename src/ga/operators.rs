//! Permutation-preserving crossover and mutation for tours.
//!
//! The slice-level functions work on a tour's interior (customers only);
//! the [`CrossoverOperator`] / [`MutationOperator`] impls wrap them so the
//! depot is stripped before and re-attached after every operation.
//!
//! # Crossover Operators
//!
//! - [`order_crossover`] (OX): one child, segment from the first parent,
//!   remaining customers in the second parent's order, placed cyclically
//!   after the segment
//! - [`paired_order_crossover`]: two children, each keeps its own parent's
//!   segment and fills the gaps left to right from the other parent
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: exchange two distinct positions — O(1)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use super::types::{CityId, Tour};
use rand::seq::index;
use rand::Rng;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Capability traits
// ============================================================================

/// Recombines two parent tours into offspring.
///
/// Implementations must return tours whose interior is a permutation of the
/// parents' customer set, with the depot at both ends.
pub trait CrossoverOperator {
    /// Number of offspring one call produces.
    fn offspring_count(&self) -> usize;

    /// Always recombines; the crossover rate is applied by [`recombine`].
    fn crossover<R: Rng + ?Sized>(&self, first: &Tour, second: &Tour, rng: &mut R) -> Vec<Tour>;
}

/// Perturbs a tour in place without breaking its invariants.
pub trait MutationOperator {
    fn mutate<R: Rng + ?Sized>(&self, tour: &mut Tour, rng: &mut R);
}

/// Built-in crossover operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Crossover {
    /// [`order_crossover`]: one child per call.
    #[default]
    Order,
    /// [`paired_order_crossover`]: two children per call.
    PairedOrder,
}

impl CrossoverOperator for Crossover {
    fn offspring_count(&self) -> usize {
        match self {
            Crossover::Order => 1,
            Crossover::PairedOrder => 2,
        }
    }

    fn crossover<R: Rng + ?Sized>(&self, first: &Tour, second: &Tour, rng: &mut R) -> Vec<Tour> {
        let depot = first.depot();
        match self {
            Crossover::Order => {
                let child = order_crossover(first.interior(), second.interior(), rng);
                vec![Tour::new(depot, child)]
            }
            Crossover::PairedOrder => {
                let (a, b) = paired_order_crossover(first.interior(), second.interior(), rng);
                vec![Tour::new(depot, a), Tour::new(depot, b)]
            }
        }
    }
}

/// Built-in mutation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mutation {
    /// [`swap_mutation`] on the interior.
    #[default]
    Swap,
}

impl MutationOperator for Mutation {
    fn mutate<R: Rng + ?Sized>(&self, tour: &mut Tour, rng: &mut R) {
        match self {
            Mutation::Swap => {
                if tour.interior().len() >= 2 {
                    swap_mutation(tour.interior_mut(), rng);
                }
            }
        }
    }
}

/// Applies `op` with probability `rate`.
///
/// Otherwise returns copies of the parents instead: `first` alone for a
/// one-child operator, `first` and `second` for a two-child operator.
pub fn recombine<C, R>(op: &C, first: &Tour, second: &Tour, rate: f64, rng: &mut R) -> Vec<Tour>
where
    C: CrossoverOperator,
    R: Rng + ?Sized,
{
    if rng.random_bool(rate) {
        op.crossover(first, second, rng)
    } else if op.offspring_count() >= 2 {
        vec![first.clone(), second.clone()]
    } else {
        vec![first.clone()]
    }
}

/// Applies `op` to `tour` with probability `rate`, once for the whole tour.
///
/// Returns whether the operator ran.
pub fn maybe_mutate<M, R>(op: &M, tour: &mut Tour, rate: f64, rng: &mut R) -> bool
where
    M: MutationOperator,
    R: Rng + ?Sized,
{
    let fire = rng.random_bool(rate);
    if fire {
        op.mutate(tour, rng);
    }
    fire
}

// ============================================================================
// Crossover on interiors
// ============================================================================

/// Order Crossover (OX) producing a single child.
///
/// # Algorithm
///
/// 1. Pick distinct cut points `start < end` in `0..n`
/// 2. Copy `first[start..=end]` into the child at the same positions
/// 3. Walk `second` from its beginning, skipping customers already copied,
///    and place each one into the next free slot, starting right after
///    `end` and wrapping around
///
/// With fewer than two customers no cut is possible and `first` is copied.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn order_crossover<R: Rng + ?Sized>(
    first: &[CityId],
    second: &[CityId],
    rng: &mut R,
) -> Vec<CityId> {
    let n = first.len();
    assert_eq!(n, second.len(), "parents must have equal length");

    if n < 2 {
        return first.to_vec();
    }

    let (start, end) = cut_points(n, rng);
    let copied: HashSet<CityId> = first[start..=end].iter().copied().collect();

    let mut child: Vec<Option<CityId>> = vec![None; n];
    for i in start..=end {
        child[i] = Some(first[i]);
    }

    let mut pos = (end + 1) % n;
    for &city in second.iter().filter(|c| !copied.contains(*c)) {
        while child[pos].is_some() {
            pos = (pos + 1) % n;
        }
        child[pos] = Some(city);
    }

    child.into_iter().flatten().collect()
}

/// Order Crossover producing two children.
///
/// Child one keeps `first[start..=end]` in place and fills the remaining
/// slots left to right with `second`'s other customers in `second`'s order;
/// child two is the mirror image. With fewer than two customers both
/// parents are copied.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn paired_order_crossover<R: Rng + ?Sized>(
    first: &[CityId],
    second: &[CityId],
    rng: &mut R,
) -> (Vec<CityId>, Vec<CityId>) {
    let n = first.len();
    assert_eq!(n, second.len(), "parents must have equal length");

    if n < 2 {
        return (first.to_vec(), second.to_vec());
    }

    let (start, end) = cut_points(n, rng);
    (
        fill_linear(first, second, start, end),
        fill_linear(second, first, start, end),
    )
}

/// Keeps `template[start..=end]`, fills the rest from `donor` left to right.
fn fill_linear(template: &[CityId], donor: &[CityId], start: usize, end: usize) -> Vec<CityId> {
    let kept: HashSet<CityId> = template[start..=end].iter().copied().collect();
    let mut rest = donor.iter().copied().filter(|c| !kept.contains(c));

    (0..template.len())
        .map(|i| {
            if (start..=end).contains(&i) {
                template[i]
            } else {
                rest.next().unwrap_or(template[i])
            }
        })
        .collect()
}

// ============================================================================
// Mutation on interiors
// ============================================================================

/// Swap mutation: exchange two distinct random positions.
///
/// No-op for fewer than two elements.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng + ?Sized>(perm: &mut [CityId], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let picked = index::sample(rng, n, 2);
    perm.swap(picked.index(0), picked.index(1));
}

// ============================================================================
// Helpers
// ============================================================================

/// Two distinct cut points `start < end` drawn uniformly from `0..n`.
fn cut_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, n, 2);
    let (a, b) = (picked.index(0), picked.index(1));
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn is_permutation_of(perm: &[CityId], of: &[CityId]) -> bool {
        let mut a = perm.to_vec();
        let mut b = of.to_vec();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }

    // ---- OX (single child) ----

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1 = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let p2 = vec![8, 7, 6, 5, 4, 3, 2, 1];

        for _ in 0..200 {
            let child = order_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation_of(&child, &p1), "OX child not valid: {child:?}");
        }
    }

    #[test]
    fn test_ox_keeps_a_segment_of_first_parent() {
        let mut rng = create_rng(123);
        let p1 = vec![10, 20, 30, 40, 50, 60];
        let p2 = vec![60, 50, 40, 30, 20, 10];

        for _ in 0..100 {
            let child = order_crossover(&p1, &p2, &mut rng);
            // At least two positions (the cut points) match the first parent.
            let same = child.iter().zip(&p1).filter(|(a, b)| a == b).count();
            assert!(same >= 2, "child {child:?} shares {same} positions with p1");
        }
    }

    #[test]
    fn test_ox_known_cut() {
        // Reproduce the fill rule with a fixed segment [2, 3]:
        // p1 = [1 2 | 3 4 | 5 6], p2 = [6 5 4 3 2 1]
        // p2 minus {3,4} = [6 5 2 1], placed from slot 4 cyclically: 4,5,0,1
        let p1 = [1, 2, 3, 4, 5, 6];
        let p2 = [6, 5, 4, 3, 2, 1];
        let copied: HashSet<CityId> = [3, 4].into_iter().collect();
        let mut child = vec![None; 6];
        child[2] = Some(3);
        child[3] = Some(4);
        let mut pos = 4;
        for &c in p2.iter().filter(|c| !copied.contains(*c)) {
            while child[pos].is_some() {
                pos = (pos + 1) % 6;
            }
            child[pos] = Some(c);
        }
        let expected: Vec<CityId> = child.into_iter().flatten().collect();
        assert_eq!(expected, vec![2, 1, 3, 4, 6, 5]);

        // Search seeds until the operator picks that segment, then compare.
        let mut found = false;
        for seed in 0..500 {
            let mut probe = create_rng(seed);
            let (s, e) = cut_points(6, &mut probe);
            if (s, e) == (2, 3) {
                let mut rng = create_rng(seed);
                assert_eq!(order_crossover(&p1, &p2, &mut rng), expected);
                found = true;
                break;
            }
        }
        assert!(found, "no seed produced the cut (2, 3)");
    }

    #[test]
    fn test_ox_degenerate_lengths() {
        let mut rng = create_rng(42);
        assert_eq!(order_crossover(&[], &[], &mut rng), Vec::<CityId>::new());
        assert_eq!(order_crossover(&[7], &[7], &mut rng), vec![7]);
    }

    #[test]
    fn test_ox_two_elements() {
        let mut rng = create_rng(42);
        for _ in 0..20 {
            let child = order_crossover(&[1, 2], &[2, 1], &mut rng);
            assert_eq!(child, vec![1, 2]);
        }
    }

    // ---- Paired OX ----

    #[test]
    fn test_paired_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1 = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let p2 = vec![4, 8, 6, 2, 7, 1, 3, 5];

        for _ in 0..200 {
            let (c1, c2) = paired_order_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation_of(&c1, &p1), "child1 not valid: {c1:?}");
            assert!(is_permutation_of(&c2, &p1), "child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_fill_linear() {
        let child = fill_linear(&[1, 2, 3, 4, 5, 6], &[6, 5, 4, 3, 2, 1], 2, 3);
        assert_eq!(child, vec![6, 5, 3, 4, 2, 1]);
    }

    #[test]
    fn test_paired_ox_identical_parents() {
        let mut rng = create_rng(42);
        let p = vec![5, 3, 1, 2, 4];
        let (c1, c2) = paired_order_crossover(&p, &p, &mut rng);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    #[test]
    fn test_paired_ox_degenerate_lengths() {
        let mut rng = create_rng(42);
        assert_eq!(paired_order_crossover(&[9], &[9], &mut rng), (vec![9], vec![9]));
    }

    // ---- Tour-level operators ----

    #[test]
    fn test_crossover_reattaches_depot() {
        let mut rng = create_rng(42);
        let a = Tour::new(0, vec![1, 2, 3, 4, 5]);
        let b = Tour::new(0, vec![5, 4, 3, 2, 1]);

        for op in [Crossover::Order, Crossover::PairedOrder] {
            let children = op.crossover(&a, &b, &mut rng);
            assert_eq!(children.len(), op.offspring_count());
            for child in children {
                assert!(child.is_valid_for(0, &[1, 2, 3, 4, 5]), "{:?}", child.cities());
            }
        }
    }

    #[test]
    fn test_recombine_zero_rate_copies_parents() {
        let mut rng = create_rng(42);
        let a = Tour::new(0, vec![1, 2, 3]);
        let b = Tour::new(0, vec![3, 2, 1]);

        assert_eq!(recombine(&Crossover::Order, &a, &b, 0.0, &mut rng), vec![a.clone()]);
        assert_eq!(
            recombine(&Crossover::PairedOrder, &a, &b, 0.0, &mut rng),
            vec![a.clone(), b.clone()]
        );
    }

    #[test]
    fn test_recombine_full_rate_recombines() {
        let mut rng = create_rng(42);
        let a = Tour::new(0, vec![1, 2, 3, 4, 5, 6]);
        let b = Tour::new(0, vec![6, 5, 4, 3, 2, 1]);

        let differs = (0..50).any(|_| {
            let children = recombine(&Crossover::Order, &a, &b, 1.0, &mut rng);
            children[0] != a && children[0] != b
        });
        assert!(differs, "crossover at rate 1.0 never produced a new tour");
    }

    #[test]
    fn test_swap_mutation_changes_exactly_two_positions() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let original: Vec<CityId> = (1..=10).collect();
            let mut perm = original.clone();
            swap_mutation(&mut perm, &mut rng);
            let diff = perm.iter().zip(&original).filter(|(a, b)| a != b).count();
            assert_eq!(diff, 2);
            assert!(is_permutation_of(&perm, &original));
        }
    }

    #[test]
    fn test_swap_mutation_short_interiors() {
        let mut rng = create_rng(42);
        let mut empty: Vec<CityId> = vec![];
        swap_mutation(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut tour = Tour::new(0, vec![1]);
        Mutation::Swap.mutate(&mut tour, &mut rng);
        assert_eq!(tour.cities(), &[0, 1, 0]);
    }

    #[test]
    fn test_mutation_never_touches_depot() {
        let mut rng = create_rng(42);
        let mut tour = Tour::new(0, vec![1, 2]);
        for _ in 0..50 {
            Mutation::Swap.mutate(&mut tour, &mut rng);
            assert_eq!(tour.cities()[0], 0);
            assert_eq!(tour.cities()[3], 0);
        }
    }

    #[test]
    fn test_maybe_mutate_rates() {
        let mut rng = create_rng(42);
        let mut tour = Tour::new(0, vec![1, 2, 3, 4]);
        let before = tour.clone();
        for _ in 0..100 {
            assert!(!maybe_mutate(&Mutation::Swap, &mut tour, 0.0, &mut rng));
        }
        assert_eq!(tour, before);
        assert!(maybe_mutate(&Mutation::Swap, &mut tour, 1.0, &mut rng));
        assert_ne!(tour.cities(), before.cities());
    }

    #[test]
    fn test_cut_points_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (start, end) = cut_points(10, &mut rng);
            assert!(start < end);
            assert!(end < 10);
        }
    }

    // ---- Properties ----

    fn parents() -> impl Strategy<Value = (Vec<CityId>, Vec<CityId>, u64)> {
        (0usize..30).prop_flat_map(|n| {
            let base: Vec<CityId> = (1..=n).collect();
            (
                Just(base.clone()).prop_shuffle(),
                Just(base).prop_shuffle(),
                any::<u64>(),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_ox_is_permutation((p1, p2, seed) in parents()) {
            let mut rng = create_rng(seed);
            let child = order_crossover(&p1, &p2, &mut rng);
            prop_assert!(is_permutation_of(&child, &p1));
        }

        #[test]
        fn prop_paired_ox_is_permutation((p1, p2, seed) in parents()) {
            let mut rng = create_rng(seed);
            let (c1, c2) = paired_order_crossover(&p1, &p2, &mut rng);
            prop_assert!(is_permutation_of(&c1, &p1));
            prop_assert!(is_permutation_of(&c2, &p1));
        }

        #[test]
        fn prop_swap_is_permutation((p1, _p2, seed) in parents()) {
            let mut rng = create_rng(seed);
            let mut perm = p1.clone();
            swap_mutation(&mut perm, &mut rng);
            prop_assert!(is_permutation_of(&perm, &p1));
        }
    }
}
