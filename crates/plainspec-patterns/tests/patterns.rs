//! Behavioural coverage for phrase normalisation and pattern assembly.

use plainspec_patterns::{
    EnumType, InlineCatalogue, Param, ParamType, Prefix, StepKind, compile_definition_regex,
    looks_like_step_definition, phrase, suggest_identifier,
};

const KEYWORDS: [&str; 4] = ["given", "when", "then", "and"];

fn compile(identifier: &str, params: &[Param]) -> regex::Regex {
    match compile_definition_regex(identifier, params, &InlineCatalogue::standard(), &KEYWORDS) {
        Ok(regex) => regex,
        Err(err) => panic!("pattern for `{identifier}` should compile: {err}"),
    }
}

#[test]
fn phrase_round_trips_word_boundaries() {
    assert_eq!(phrase("Given_a_user", Prefix::Keep), "Given a user");
    assert_eq!(phrase("GivenAUser", Prefix::Keep), "Given A User");
    assert_eq!(
        phrase("When_something_happens", Prefix::Strip),
        "something happens"
    );
}

#[test]
fn numeric_pattern_accepts_ordinals_and_negatives() {
    let regex = compile("Given_count_items", &[Param::new("count", ParamType::int())]);
    for text in ["Given 3rd items", "Given -12 items", "Given 42nd items"] {
        assert!(regex.is_match(text), "{text} should match");
    }
    assert!(!regex.is_match("Given null items"));
}

#[test]
fn nullable_numeric_pattern_accepts_null() {
    let regex = compile(
        "Given_count_items",
        &[Param::new("count", ParamType::nullable_int())],
    );
    assert!(regex.is_match("Given null items"));
    assert!(regex.is_match("Given 7 items"));
}

#[test]
fn enum_pattern_covers_every_value_and_nothing_else() {
    let colour = EnumType {
        name: "Colour",
        values: &["Red", "BlueGreen"],
    };
    let regex = compile(
        "When_the_light_turns_colour",
        &[Param::new("colour", ParamType::Enum(colour))],
    );
    assert!(regex.is_match("When the light turns red"));
    assert!(regex.is_match("When the light turns Blue Green"));
    assert!(!regex.is_match("When the light turns purple"));
}

#[test]
fn definition_tester_and_suggestion_agree() {
    let suggestion = suggest_identifier(StepKind::When, "When the user logs in");
    assert_eq!(suggestion, "When_the_user_logs_in");
    assert!(looks_like_step_definition(&suggestion));
}
