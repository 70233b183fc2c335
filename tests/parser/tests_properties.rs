//! Properties every parsed chain keeps.

use rstest::rstest;

use crate::helpers::chain_assertions::{assert_valid, reconstruct};
use crate::helpers::model_fixtures::parse;

// ============================================================================
// Ranges and Round Trip
// ============================================================================

#[rstest]
#[case("policy")]
#[case("premium")]
#[case("policyHolder.address")]
#[case("coverage[2].limit")]
#[case("policy.coverage[0].insuredPersons[12].name")]
#[case("paymentMode@default")]
#[case("coverage[1].limit@default")]
#[case(r#"coverage["FireCoverage"].limit"#)]
#[case(r#"policy.coverage["CollisionStandard"].deductible"#)]
#[case("Gender.MALE")]
#[case("policyHolder.gender.FEMALE")]
#[case("mainCoverage.insuredPersons")]
#[case("policy.prämie")]
fn test_valid_chain_covers_identifier(#[case] identifier: &str) {
    let chain = parse(identifier);
    assert_valid(identifier, &chain);
    assert_eq!(reconstruct(identifier, &chain), identifier);
    assert_eq!(chain.to_identifier_string(), identifier);
    assert_eq!(chain.to_string(), identifier);
}

#[rstest]
#[case("policy.unknown")]
#[case("coverage[0].deductible")]
#[case("policy.")]
#[case("premium[0]")]
fn test_invalid_chain_ranges_stay_ordered(#[case] identifier: &str) {
    let chain = parse(identifier);
    assert!(!chain.is_valid());
    assert_eq!(reconstruct(identifier, &chain), identifier);
}

// ============================================================================
// Fail-fast
// ============================================================================

#[rstest]
#[case("unknown.premium.amount", 1)]
#[case("policy.unknown.limit", 2)]
#[case("policy.mainCoverage.unknown.name", 3)]
#[case("policy.mainCoverage.insuredPersons.name.unknown", 5)]
#[case("policyHolder.gender.UNKNOWN.MALE", 3)]
fn test_first_unresolvable_segment_ends_chain(#[case] identifier: &str, #[case] k: usize) {
    let chain = parse(identifier);
    let nodes: Vec<_> = chain.iter().collect();

    assert_eq!(nodes.len(), k, "{} valid nodes and one invalid", k - 1);
    assert!(
        nodes[..k - 1].iter().all(|n| !n.kind().is_invalid()),
        "nodes before segment {} must be resolved",
        k
    );
    assert!(nodes[k - 1].kind().is_invalid());
    assert!(nodes[k - 1].successor().is_none());
    assert!(nodes[k - 1].datatype().is_none());
}

#[test]
fn test_chain_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}
    let chain = parse("coverage[2].limit");
    assert_send_sync(&chain);

    let handle = std::thread::spawn(move || chain.len());
    assert_eq!(handle.join().expect("thread"), 3);
}
