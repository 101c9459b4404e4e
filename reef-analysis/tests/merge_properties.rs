//! Property-based tests for the widening merge and the type display/parse
//! pair, over arbitrarily nested descriptors.

use proptest::prelude::*;

use reef_analysis::{
    contains_unknown, merge_types, parse_type_string, type_to_string, TypeDescriptor, TypeKind,
};

/// Leaf descriptors, including Unknown. Custom names start with `U` and
/// stay short so they can never collide with a builtin type name.
fn leaf_type() -> impl Strategy<Value = TypeDescriptor> {
    prop_oneof![
        Just(TypeDescriptor::new(TypeKind::Int)),
        Just(TypeDescriptor::new(TypeKind::String)),
        Just(TypeDescriptor::new(TypeKind::Bool)),
        Just(TypeDescriptor::unknown()),
        "U[a-z]{0,5}".prop_map(TypeDescriptor::custom),
    ]
}

fn arb_type() -> impl Strategy<Value = TypeDescriptor> {
    leaf_type().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner
                .clone()
                .prop_map(|element| TypeDescriptor::with_generics(TypeKind::List, vec![element])),
            (inner.clone(), inner.clone()).prop_map(|(key, value)| {
                TypeDescriptor::with_generics(TypeKind::MutableMap, vec![key, value])
            }),
            inner
                .prop_map(|element| {
                    TypeDescriptor::with_generics(TypeKind::MutableSet, vec![element])
                }),
        ]
    })
}

/// Like `arb_type`, but without Unknown leaves: these descriptors render
/// and re-parse exactly.
fn displayable_type() -> impl Strategy<Value = TypeDescriptor> {
    let leaf = prop_oneof![
        Just(TypeDescriptor::new(TypeKind::Int)),
        Just(TypeDescriptor::new(TypeKind::String)),
        Just(TypeDescriptor::new(TypeKind::Bool)),
        "U[a-z]{0,5}".prop_map(TypeDescriptor::custom),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner
                .clone()
                .prop_map(|element| TypeDescriptor::with_generics(TypeKind::List, vec![element])),
            (inner.clone(), inner.clone()).prop_map(|(key, value)| {
                TypeDescriptor::with_generics(TypeKind::MutableMap, vec![key, value])
            }),
            inner
                .prop_map(|element| {
                    TypeDescriptor::with_generics(TypeKind::MutableSet, vec![element])
                }),
        ]
    })
}

proptest! {
    #[test]
    fn unknown_is_a_left_identity(ty in arb_type()) {
        prop_assert_eq!(merge_types(&TypeDescriptor::unknown(), &ty), ty);
    }

    #[test]
    fn unknown_is_a_right_identity(ty in arb_type()) {
        prop_assert_eq!(merge_types(&ty, &TypeDescriptor::unknown()), ty);
    }

    #[test]
    fn merge_is_idempotent(ty in arb_type()) {
        prop_assert_eq!(merge_types(&ty, &ty), ty);
    }

    #[test]
    fn mismatched_kinds_keep_the_left_side(a in arb_type(), b in arb_type()) {
        prop_assume!(a.kind != TypeKind::Unknown);
        prop_assume!(b.kind != TypeKind::Unknown);
        prop_assume!(a.kind != b.kind);
        prop_assert_eq!(merge_types(&a, &b), a);
    }

    #[test]
    fn merge_never_invents_unknown(a in arb_type(), b in arb_type()) {
        let merged = merge_types(&a, &b);
        if contains_unknown(&merged) {
            prop_assert!(contains_unknown(&a) || contains_unknown(&b));
        }
    }

    #[test]
    fn merge_prefers_known_over_unknown_slots(element in displayable_type()) {
        let unknown_list =
            TypeDescriptor::with_generics(TypeKind::List, vec![TypeDescriptor::unknown()]);
        let known_list =
            TypeDescriptor::with_generics(TypeKind::List, vec![element.clone()]);
        prop_assert_eq!(merge_types(&unknown_list, &known_list), known_list);
    }

    #[test]
    fn display_then_parse_round_trips(ty in displayable_type()) {
        prop_assert_eq!(parse_type_string(&type_to_string(&ty)), ty);
    }
}
