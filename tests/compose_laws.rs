#![cfg(feature = "compose")]
//! Property-based tests for function composition laws.
//!
//! ## Composition Laws
//! - **Associativity**: `compose(f, compose(g, h)) == compose(compose(f, g), h)`
//! - **Left Identity**: `compose(identity, f) == f`
//! - **Right Identity**: `compose(f, identity) == f`
//!
//! ## Flip Laws
//! - **Double Flip Identity**: `flip(flip(f)) == f`
//! - **Flip Definition**: `flip(f)(a, b) == f(b, a)`
//!
//! ## Partial Application Laws
//! - **Bind**: `bind(f, a)(b) == f(a, b)`
//! - **Curry**: `curry(f)(a)(b) == f(a, b)`
//!
//! ## Pipeline Laws
//! - **Map Fusion**: `s.map(g).map(f) == s.map(compose(f, g))`

use lazyseq::compose::{bind, compose, constant, curry, flip, identity};
use lazyseq::sequence::{Sequence, iterate};
use proptest::prelude::*;

// =============================================================================
// Composition Laws
// =============================================================================

proptest! {
    /// Left Identity Law: compose(identity, f)(x) == f(x)
    #[test]
    fn prop_compose_left_identity(x in any::<i32>()) {
        let function = |n: i32| n.wrapping_mul(2);
        prop_assert_eq!(compose(identity, function)(x), function(x));
    }

    /// Right Identity Law: compose(f, identity)(x) == f(x)
    #[test]
    fn prop_compose_right_identity(x in any::<i32>()) {
        let function = |n: i32| n.wrapping_mul(2);
        prop_assert_eq!(compose(function, identity)(x), function(x));
    }

    /// Associativity Law
    #[test]
    fn prop_compose_associativity(x in any::<i32>()) {
        let function1 = |n: i32| n.wrapping_add(1);
        let function2 = |n: i32| n.wrapping_mul(2);
        let function3 = |n: i32| n.wrapping_sub(3);

        let left_associative = compose(function1, compose(function2, function3));
        let right_associative = compose(compose(function1, function2), function3);

        prop_assert_eq!(left_associative(x), right_associative(x));
    }

    /// Constant absorbs composition on the right: compose(constant(c), f)(x) == c
    #[test]
    fn prop_constant_absorbs(x in any::<i32>(), c in any::<i64>()) {
        let function = |n: i32| n.wrapping_neg();
        prop_assert_eq!(compose(constant(c), function)(x), c);
    }
}

// =============================================================================
// Flip Laws
// =============================================================================

proptest! {
    /// Double flip is the original function.
    #[test]
    fn prop_flip_twice_is_identity(a in any::<i32>(), b in any::<i32>()) {
        let function = |x: i32, y: i32| x.wrapping_sub(y);
        prop_assert_eq!(flip(flip(function))(a, b), function(a, b));
    }

    /// Flip swaps arguments.
    #[test]
    fn prop_flip_definition(a in any::<i32>(), b in any::<i32>()) {
        let function = |x: i32, y: i32| x.wrapping_sub(y);
        prop_assert_eq!(flip(function)(a, b), function(b, a));
    }
}

// =============================================================================
// Partial Application Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_bind_equivalence(a in any::<i32>(), b in any::<i32>()) {
        let function = |x: i32, y: i32| x.wrapping_mul(31).wrapping_add(y);
        prop_assert_eq!(bind(function, a)(b), function(a, b));
    }

    #[test]
    fn prop_curry_equivalence(a in any::<i32>(), b in any::<i32>()) {
        let function = |x: i32, y: i32| x.wrapping_mul(31).wrapping_add(y);
        prop_assert_eq!(curry(function)(a)(b), function(a, b));
    }
}

// =============================================================================
// Pipeline Laws
// =============================================================================

proptest! {
    /// Mapping twice equals mapping once with the composition.
    #[test]
    fn prop_map_fusion(values in prop::collection::vec(any::<i32>(), 0..30)) {
        let inner = |n: i32| i64::from(n) * 3;
        let outer = |n: i64| n - 7;

        let twice = iterate(values.clone()).map(inner).map(outer).to_array().unwrap();
        let fused = iterate(values).map(compose(outer, inner)).to_array().unwrap();

        prop_assert_eq!(twice, fused);
    }
}
