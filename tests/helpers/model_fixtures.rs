//! Insurance model shared by the integration tests.
//!
//! ```text
//! Policy ──policyHolder──▶ Person
//!   ├──coverage (to-many, qualified, matched by CoverageType)──▶ Coverage
//!   └──mainCoverage──▶ Coverage ──insuredPersons (to-many)──▶ Person
//! CollisionCoverage extends Coverage
//!
//! Product configures Policy
//! CoverageType configures Coverage
//! CollisionCoverageType extends CoverageType, configures CollisionCoverage
//!
//! HomeProduct ──CoverageType──▶ FireCoverage, CollisionStandard
//! TheftCoverage (not linked)
//! ```

use fl_identifier::model::{
    Association, Attribute, InMemoryModel, Parameter, ProductCmpt, ProductCmptGeneration,
};
use fl_identifier::{IdentifierFilter, IdentifierNode, ParseSession, ParserOptions};

/// Type every formula of the fixtures is defined on.
pub const CONTEXT_TYPE: &str = "Policy";

pub fn insurance_model() -> InMemoryModel {
    InMemoryModel::builder()
        .value_datatype("String")
        .value_datatype("Decimal")
        .value_datatype("Integer")
        .value_datatype("Money")
        .value_datatype("Boolean")
        .enumeration("Gender", ["MALE", "FEMALE"])
        .enumeration("PaymentMode", ["ANNUAL", "MONTHLY"])
        .policy_type("Person", |t| {
            t.attribute(Attribute::new("name", "String"))
                .attribute(Attribute::new("address", "String"))
                .attribute(Attribute::new("gender", "Gender"))
                .attribute(Attribute::new("birthYear", "Integer"))
        })
        .policy_type("Policy", |t| {
            t.attribute(Attribute::new("premium", "Money").configurable())
                .attribute(Attribute::new("paymentMode", "PaymentMode").configurable())
                .attribute(Attribute::new("policyNumber", "String"))
                .attribute(Attribute::new("tags", "String").multi_valued())
                .attribute(Attribute::new("prämie", "Money"))
                .association(Association::to_one("policyHolder", "Person"))
                .association(
                    Association::to_many("coverage", "Coverage")
                        .qualified()
                        .matched_by("CoverageType"),
                )
                .association(Association::to_one("mainCoverage", "Coverage"))
        })
        .policy_type("Coverage", |t| {
            t.attribute(Attribute::new("limit", "Money").configurable())
                .attribute(Attribute::new("sumInsured", "Money"))
                .association(Association::to_many("insuredPersons", "Person"))
        })
        .policy_type("CollisionCoverage", |t| {
            t.extends("Coverage")
                .attribute(Attribute::new("deductible", "Money"))
        })
        .product_type("Product", |t| {
            t.configures("Policy")
                .attribute(Attribute::new("productName", "String"))
                .association(Association::to_many("CoverageType", "CoverageType"))
        })
        .product_type("CoverageType", |t| t.configures("Coverage"))
        .product_type("CollisionCoverageType", |t| {
            t.extends("CoverageType").configures("CollisionCoverage")
        })
        .product_cmpt(
            ProductCmpt::new("HomeProduct", "Product")
                .with_link("CoverageType", "FireCoverage")
                .with_link("CoverageType", "CollisionStandard"),
        )
        .product_cmpt(ProductCmpt::new("FireCoverage", "CoverageType"))
        .product_cmpt(ProductCmpt::new("TheftCoverage", "CoverageType"))
        .product_cmpt(ProductCmpt::new("CollisionStandard", "CollisionCoverageType"))
        .build()
        .expect("insurance model should build")
}

/// Formula signature used by most tests.
pub fn formula_parameters() -> Vec<Parameter> {
    vec![
        Parameter::new("policy", "Policy"),
        Parameter::new("policyHolder", "Person"),
        Parameter::new("age", "Integer"),
        Parameter::new("mode", "PaymentMode"),
    ]
}

/// The generation of `HomeProduct` formulas are evaluated for.
pub fn home_generation() -> ProductCmptGeneration {
    ProductCmptGeneration::new("HomeProduct", "Product")
}

/// Parse with the fixture signature and context type.
pub fn parse(identifier: &str) -> IdentifierNode {
    parse_in(identifier, ParseSession::default())
}

/// Parse with the fixture signature and a filter.
pub fn parse_filtered(identifier: &str, filter: IdentifierFilter) -> IdentifierNode {
    parse_in(identifier, ParseSession::default().with_filter(filter))
}

/// Parse with the fixture signature and options.
pub fn parse_with_options(identifier: &str, options: ParserOptions) -> IdentifierNode {
    parse_in(identifier, ParseSession::default().with_options(options))
}

fn parse_in(identifier: &str, session: ParseSession) -> IdentifierNode {
    let model = insurance_model();
    fl_identifier::parse_with(
        identifier,
        &formula_parameters(),
        Some(CONTEXT_TYPE),
        &model,
        &session,
    )
    .expect("fixture parameters are valid")
}
