//! Candidate lists are a pure function of location, name and settings

use caconf::resolver::{CandidateDeriver, CandidateOrigin};
use caconf::tree::ResourcePath;
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,7}"
}

fn location() -> impl Strategy<Value = ResourcePath> {
    prop::collection::vec(segment(), 0..6).prop_map(|segments| {
        ResourcePath::parse(&format!("/{}", segments.join("/"))).unwrap()
    })
}

fn config_name() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..3).prop_map(|segments| segments.join("/"))
}

/// Test that the list holds one entry per non-root ancestor plus one per root
#[test]
fn test_candidate_count_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(location(), config_name()), |(location, name)| {
            let deriver = CandidateDeriver::default();
            let candidates = deriver.derive(&location, &name).unwrap();
            prop_assert_eq!(
                candidates.len(),
                location.depth() + deriver.fallback_roots().len()
            );
            Ok(())
        })
        .unwrap();
}

/// Test that context candidates come nearest first and fallback roots keep their order
#[test]
fn test_candidate_order_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(location(), config_name()), |(location, name)| {
            let deriver = CandidateDeriver::default();
            let candidates = deriver.derive(&location, &name).unwrap();
            let ancestors = location.ancestors();

            for (i, candidate) in candidates.iter().enumerate() {
                if i < ancestors.len() {
                    let expected = ancestors[i].join(&format!("sling:configs/{}", name)).unwrap();
                    prop_assert_eq!(&candidate.path, &expected);
                    prop_assert_eq!(
                        &candidate.origin,
                        &CandidateOrigin::Context(ancestors[i].clone())
                    );
                } else {
                    let root = &deriver.fallback_roots()[i - ancestors.len()];
                    prop_assert_eq!(&candidate.path, &root.join(&name).unwrap());
                    prop_assert_eq!(&candidate.origin, &CandidateOrigin::FallbackRoot(root.clone()));
                }
            }
            Ok(())
        })
        .unwrap();
}

/// Test that derivation is deterministic
#[test]
fn test_candidate_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(location(), config_name(), segment()),
            |(location, name, bucket)| {
                let deriver = CandidateDeriver::new(
                    bucket,
                    vec![ResourcePath::parse("/defaults").unwrap()],
                )
                .unwrap();
                let first = deriver.derive(&location, &name).unwrap();
                let second = deriver.clone().derive(&location, &name).unwrap();
                prop_assert_eq!(first, second);
                Ok(())
            },
        )
        .unwrap();
}
