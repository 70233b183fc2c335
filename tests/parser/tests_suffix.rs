//! Index and qualifier suffixes.

use fl_identifier::model::Datatype;
use fl_identifier::{ErrorCode, Name, NodeKind};
use rstest::rstest;

use crate::helpers::chain_assertions::{assert_invalid_at, assert_valid, labels};
use crate::helpers::model_fixtures::parse;

// ============================================================================
// Index Placement
// ============================================================================

#[rstest]
#[case("policy[0]", 6)]
#[case("premium[0]", 7)]
#[case("tags[0]", 4)]
#[case("mainCoverage[0]", 12)]
#[case("policyHolder[0]", 12)]
#[case("policy.policyNumber[0]", 19)]
#[case("policyHolder.gender[0]", 19)]
#[case("Gender[0]", 6)]
#[case("Gender.MALE[0]", 11)]
fn test_index_after_non_list_association(#[case] identifier: &str, #[case] start: u32) {
    let chain = parse(identifier);
    assert_invalid_at(&chain, ErrorCode::E0303, start, start + 3);
    assert_eq!(chain.iter().filter(|n| n.kind().is_invalid()).count(), 1);
}

#[rstest]
#[case("coverage[0]", "Coverage")]
#[case("policy.coverage[7]", "Coverage")]
#[case("coverage.insuredPersons[0]", "Person")]
#[case("mainCoverage.insuredPersons[3]", "Person")]
#[case("coverage[0].insuredPersons[0]", "Person")]
fn test_index_after_list_association(#[case] identifier: &str, #[case] element: &str) {
    let chain = parse(identifier);
    assert_valid(identifier, &chain);

    let index = chain.last();
    assert!(matches!(index.kind(), NodeKind::Index(_)));
    assert!(!index.is_list_of_types());
    assert_eq!(index.datatype(), Some(&Datatype::model_type(element)));
}

#[test]
fn test_index_is_not_range_checked() {
    let chain = parse("coverage[4294967295]");
    assert_valid("coverage[4294967295]", &chain);
    assert_eq!(chain.last().kind(), &NodeKind::Index(u32::MAX));
}

// ============================================================================
// Qualifiers
// ============================================================================

#[test]
fn test_qualifier_narrows_to_configured_type() {
    let chain = parse(r#"coverage["CollisionStandard"].deductible"#);
    assert_valid("qualified coverage", &chain);
    assert_eq!(labels(&chain), vec!["association", "qualifier", "attribute"]);

    let qualifier = chain.successor().expect("qualifier node");
    assert_eq!(
        qualifier.kind(),
        &NodeKind::Qualifier(Name::new("CollisionStandard"))
    );
    assert_eq!(
        qualifier.datatype(),
        Some(&Datatype::list_of(Datatype::model_type("CollisionCoverage")))
    );
    assert_eq!(
        chain.last().datatype(),
        Some(&Datatype::list_of(Datatype::value("Money")))
    );
}

#[test]
fn test_qualifier_after_parameter() {
    let chain = parse(r#"policy.coverage["FireCoverage"].limit"#);
    assert_valid("qualified coverage", &chain);
    assert_eq!(
        labels(&chain),
        vec!["parameter", "association", "qualifier", "attribute"]
    );
}

#[rstest]
#[case(r#"mainCoverage["FireCoverage"]"#, ErrorCode::E0304, 12, 28)]
#[case(r#"policyHolder["FireCoverage"]"#, ErrorCode::E0304, 12, 28)]
#[case(r#"premium["FireCoverage"]"#, ErrorCode::E0304, 7, 23)]
#[case(r#"coverage.insuredPersons["FireCoverage"]"#, ErrorCode::E0304, 23, 39)]
#[case(r#"coverage["Nothing"]"#, ErrorCode::E0305, 8, 19)]
#[case(r#"coverage["HomeProduct"]"#, ErrorCode::E0306, 8, 23)]
fn test_qualifier_failure(
    #[case] identifier: &str,
    #[case] code: ErrorCode,
    #[case] start: u32,
    #[case] end: u32,
) {
    let chain = parse(identifier);
    assert_invalid_at(&chain, code, start, end);
}
