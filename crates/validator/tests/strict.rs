//! Strict rule interpretation.

use rstest::rstest;
use validata::prelude::*;

fn strict() -> Validator {
    Validator::builder().strict(true).build().unwrap()
}

#[rstest]
#[case("required|emial", "emial")]
#[case("min:abc", "min:abc")]
#[case("between:1", "between:1")]
#[case("slice:most:2", "slice:most:2")]
#[case("unique:users", "unique:users")]
#[case("same", "same")]
#[tokio::test]
async fn misconfigured_directives_are_faults(#[case] rules: &str, #[case] directive: &str) {
    let record = Record::new().field("field", rules, 5_i32);
    let err = strict().validate(&record, None).await.unwrap_err();
    match err {
        ValidataError::InvalidRule { directive: found, .. } => assert_eq!(found, directive),
        other => panic!("expected InvalidRule, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_directive_is_a_fault_even_for_empty_values() {
    let record = Record::new().field("nickname", "alhpa", "");
    let err = strict().validate(&record, None).await.unwrap_err();
    assert!(matches!(err, ValidataError::InvalidRule { .. }));
}

#[rstest]
#[case("min:abc", "")]
#[case("alpha|min:abc", "12")]
#[case("between:1", "")]
#[case("slice:min:x", "")]
#[case("size:lots", "abc")]
#[tokio::test]
async fn bad_bound_parameters_fault_whatever_the_value(#[case] rules: &str, #[case] value: &str) {
    let record = Record::new().field("nickname", rules, value);
    let err = strict().validate(&record, None).await.unwrap_err();
    assert!(matches!(err, ValidataError::InvalidRule { .. }), "{rules} on {value:?}: {err:?}");
}

#[tokio::test]
async fn byte_threshold_size_passes_the_parameter_check() {
    let record = Record::new().field("nickname", "size:2MB", "");
    assert!(strict().validate(&record, None).await.unwrap().is_none());
}

#[tokio::test]
async fn dangling_reference_is_unknown_field() {
    let record = Record::new().field("password_confirm", "same:password", "x");
    let err = strict().validate(&record, None).await.unwrap_err();
    assert!(matches!(
        err,
        ValidataError::UnknownField { ref field, ref target }
            if field == "password_confirm" && target == "password"
    ));
}

#[tokio::test]
async fn well_formed_chains_behave_as_in_lax_mode() {
    let record = record! {
        "email": "required|email" => "a@example.com",
        "age": "required|between:17,99" => 18_u8,
        "password": "required" => "pw",
        "confirm": "same:password" => "pw",
    };
    let result = strict().validate(&record, None).await.unwrap().unwrap();
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.message("email"), Some("The email field must be a valid email address."));
}

#[test]
fn strictness_is_reported() {
    assert!(strict().is_strict());
    assert!(!Validator::new().unwrap().is_strict());
}

#[tokio::test]
async fn strict_mode_from_toml_config() {
    let config = ValidatorConfig::from_toml_str("strict_rules = true\ndefault_locale = \"fr\"").unwrap();
    let validator = Validator::builder().config(config).build().unwrap();
    let record = Record::new().field("x", "bogus", "1");
    assert!(validator.validate(&record, None).await.is_err());
}
