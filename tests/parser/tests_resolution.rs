//! Resolution of identifier segments against the insurance model.

use fl_identifier::model::{Association, Attribute, Datatype, InMemoryModel, Parameter};
use fl_identifier::{Error, ErrorCode, Name, NodeKind, ParserOptions};
use rstest::rstest;

use crate::helpers::chain_assertions::{assert_invalid_at, assert_valid, labels};
use crate::helpers::model_fixtures::{insurance_model, parse, parse_with_options};

// ============================================================================
// End-to-end Examples
// ============================================================================

#[test]
fn test_parameter_then_attribute() {
    let model = insurance_model();
    let params = [Parameter::new("policyHolder", "Person")];
    let chain = fl_identifier::parse("policyHolder.address", &params, None, &model)
        .expect("valid parameters");

    assert!(chain.is_valid());
    assert_eq!(labels(&chain), vec!["parameter", "attribute"]);
    assert_eq!(chain.datatype(), Some(&Datatype::model_type("Person")));

    let address = chain.successor().expect("attribute node");
    assert_eq!(address.datatype(), Some(&Datatype::value("String")));
    match address.kind() {
        NodeKind::Attribute {
            attribute,
            default_value_access,
        } => {
            assert_eq!(attribute.name.as_str(), "address");
            assert!(!default_value_access);
        }
        other => panic!("expected attribute, got {:?}", other),
    }
}

#[test]
fn test_association_index_attribute() {
    let chain = parse("coverage[2].limit");

    assert_valid("coverage[2].limit", &chain);
    assert_eq!(labels(&chain), vec!["association", "index", "attribute"]);
    assert!(chain.is_list_of_types());

    let index = chain.successor().expect("index node");
    assert_eq!(index.kind(), &NodeKind::Index(2));
    assert_eq!(index.datatype(), Some(&Datatype::model_type("Coverage")));

    let limit = index.successor().expect("attribute node");
    assert_eq!(limit.datatype(), Some(&Datatype::value("Money")));
}

#[test]
fn test_unknown_member_after_resolved_segment() {
    let model = insurance_model();
    let params = [Parameter::new("foo", "Person")];
    let chain =
        fl_identifier::parse("foo.bar", &params, None, &model).expect("valid parameters");

    assert!(!chain.is_valid());
    assert_eq!(labels(&chain), vec!["parameter", "invalid"]);
    assert_invalid_at(&chain, ErrorCode::E0201, 4, 7);
}

// ============================================================================
// Datatypes
// ============================================================================

#[rstest]
#[case("policy", "Policy")]
#[case("age", "Integer")]
#[case("policy.premium", "Money")]
#[case("premium", "Money")]
#[case("coverage", "List<Coverage>")]
#[case("coverage.limit", "List<Money>")]
#[case("coverage.insuredPersons", "List<Person>")]
#[case("coverage.insuredPersons.name", "List<String>")]
#[case("mainCoverage.limit", "Money")]
#[case("policy.mainCoverage.insuredPersons", "List<Person>")]
#[case("tags", "List<String>")]
#[case("prämie", "Money")]
#[case("policy.prämie", "Money")]
#[case("policyHolder.gender", "Gender")]
#[case("policyHolder.gender.MALE", "Gender")]
#[case("Gender.FEMALE", "Gender")]
#[case("mode.MONTHLY", "PaymentMode")]
#[case("paymentMode@default", "PaymentMode")]
#[case("policy.paymentMode@default.ANNUAL", "PaymentMode")]
#[case("coverage[0].insuredPersons[1].birthYear", "Integer")]
#[case("coverage[0].sumInsured", "Money")]
fn test_resolved_datatype(#[case] identifier: &str, #[case] expected: &str) {
    let chain = parse(identifier);
    assert_valid(identifier, &chain);
    let datatype = chain.last().datatype().expect("valid node has a datatype");
    assert_eq!(datatype.to_string(), expected, "datatype of '{}'", identifier);
}

// ============================================================================
// Resolution Failures
// ============================================================================

#[rstest]
#[case("unknown", ErrorCode::E0201, 0, 7)]
#[case("Person.name", ErrorCode::E0201, 0, 6)]
#[case("Unknown.MALE", ErrorCode::E0201, 0, 7)]
#[case("policy.unknown", ErrorCode::E0201, 7, 14)]
#[case("coverage[0].deductible", ErrorCode::E0201, 12, 22)]
#[case("policyHolder.gender.OTHER", ErrorCode::E0202, 20, 25)]
#[case("Gender.OTHER", ErrorCode::E0202, 7, 12)]
#[case("age.value", ErrorCode::E0203, 4, 9)]
#[case("policy.premium.amount", ErrorCode::E0203, 15, 21)]
#[case("tags.length", ErrorCode::E0203, 5, 11)]
#[case("Gender.MALE.FEMALE", ErrorCode::E0203, 12, 18)]
#[case("policyHolder.gender.MALE.FEMALE", ErrorCode::E0203, 25, 31)]
#[case("mode.ANNUAL.MONTHLY", ErrorCode::E0203, 12, 19)]
#[case("policy.prämi", ErrorCode::E0201, 7, 13)]
#[case("policyHolder@default", ErrorCode::E0302, 0, 20)]
#[case("policyHolder.name@default", ErrorCode::E0302, 13, 25)]
#[case("policy.policyHolder@default", ErrorCode::E0302, 7, 27)]
#[case("Gender@default", ErrorCode::E0302, 0, 14)]
fn test_resolution_failure(
    #[case] identifier: &str,
    #[case] code: ErrorCode,
    #[case] start: u32,
    #[case] end: u32,
) {
    let chain = parse(identifier);
    assert_invalid_at(&chain, code, start, end);
}

#[test]
fn test_parameter_shadows_context_association() {
    // `policyHolder` is both a parameter and an association of Policy
    let chain = parse("policyHolder.name");
    assert_valid("policyHolder.name", &chain);
    assert!(matches!(chain.kind(), NodeKind::Parameter(_)));
}

#[test]
fn test_attribute_before_association() {
    // An inherited attribute wins over an association of the same name
    let model = InMemoryModel::builder()
        .value_datatype("String")
        .policy_type("Target", |t| t)
        .policy_type("Base", |t| t.attribute(Attribute::new("link", "String")))
        .policy_type("Owner", |t| {
            t.extends("Base")
                .association(Association::to_one("link", "Target"))
        })
        .build()
        .expect("model should build");
    let chain = fl_identifier::parse("link", &[], Some("Owner"), &model).expect("no parameters");
    assert_eq!(labels(&chain), vec!["attribute"]);
}

#[test]
fn test_enum_value_is_a_leaf() {
    let chain = parse("Gender.MALE.FEMALE");
    assert_eq!(labels(&chain), vec!["enum class", "enum value", "invalid"]);
    assert_invalid_at(&chain, ErrorCode::E0203, 12, 18);
}

#[test]
fn test_non_ascii_member_is_one_segment() {
    let chain = parse("policy.prämie");
    assert_valid("policy.prämie", &chain);
    let premium = chain.successor().expect("attribute node");
    assert_eq!(premium.range(), fl_identifier::TextRange::new(7.into(), 14.into()));
    assert_eq!(premium.text("policy.prämie"), "prämie");
}

#[rstest]
#[case("policy holder")]
#[case("policy.premium")]
#[case("2nd")]
fn test_parameter_name_must_be_identifier(#[case] name: &str) {
    let model = insurance_model();
    let params = [Parameter::new(name, "Policy")];
    let result = fl_identifier::parse("x", &params, None, &model);
    assert_eq!(result.err(), Some(Error::InvalidParameterName(Name::new(name))));
}

#[test]
fn test_enum_class_requires_option() {
    let chain = parse_with_options("Gender.MALE", ParserOptions::default());
    assert_eq!(labels(&chain), vec!["enum class", "enum value"]);

    let chain = parse_with_options(
        "Gender.MALE",
        ParserOptions::default().with_enum_class_access(false),
    );
    assert_invalid_at(&chain, ErrorCode::E0201, 0, 6);
}

#[test]
fn test_default_value_access_requires_option() {
    let chain = parse_with_options(
        "premium@default",
        ParserOptions::default().with_default_value_access(false),
    );
    assert_invalid_at(&chain, ErrorCode::E0302, 0, 15);

    let chain = parse("premium@default");
    assert_valid("premium@default", &chain);
    assert!(matches!(
        chain.kind(),
        NodeKind::Attribute {
            default_value_access: true,
            ..
        }
    ));
}

#[test]
fn test_undefined_datatypes() {
    let model = InMemoryModel::builder()
        .policy_type("Thing", |t| t.attribute(Attribute::new("weight", "Weight")))
        .build()
        .expect("model should build");

    let params = [Parameter::new("x", "Unknown")];
    let chain = fl_identifier::parse("x", &params, None, &model).expect("valid parameters");
    assert_invalid_at(&chain, ErrorCode::E0204, 0, 1);

    let chain = fl_identifier::parse("weight", &[], Some("Thing"), &model).expect("no parameters");
    assert_invalid_at(&chain, ErrorCode::E0204, 0, 6);
}

#[test]
fn test_without_context_type() {
    let model = insurance_model();
    let chain = fl_identifier::parse("premium", &[], None, &model).expect("no parameters");
    assert_invalid_at(&chain, ErrorCode::E0201, 0, 7);
}

#[test]
fn test_broken_signature_is_an_error() {
    let model = insurance_model();
    let params = [
        Parameter::new("policy", "Policy"),
        Parameter::new("policy", "Coverage"),
    ];
    let result = fl_identifier::parse("policy", &params, None, &model);
    assert_eq!(result, Err(Error::DuplicateParameter(Name::new("policy"))));
}
