//! Behavioural coverage for localised documents end to end.

#![expect(clippy::expect_used, reason = "tests require descriptive failures")]

use plainspec::{DefinitionRegistry, KeywordSet, StepKind, Verifier, parse};

const FRENCH: &str = "\
# language: fr
Fonctionnalité: Connexion

Scénario: Connexion valide
Soit un utilisateur inscrit
Quand l'utilisateur se connecte
Et la session démarre
Alors le tableau de bord apparaît
";

#[test]
fn a_language_directive_selects_the_document_keywords() {
    let doc = parse(FRENCH).expect("French document should parse");
    assert_eq!(doc.language, "fr");
    let feature = doc.feature.as_ref().expect("feature should be present");
    assert_eq!(feature.name, "Connexion");
    let scenario = doc.scenarios.first().expect("scenario should be present");
    assert_eq!(scenario.name, "Connexion valide");
    let kinds: Vec<StepKind> = scenario.steps.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![StepKind::Given, StepKind::When, StepKind::When, StepKind::Then]
    );
}

#[test]
fn the_directive_is_honoured_anywhere_in_the_text() {
    let doc = parse("Scenario: Smoke\nGiven a user\n# language: en\n")
        .expect("document should parse");
    assert_eq!(doc.language, "en");
}

#[test]
fn documents_without_a_directive_use_the_default_language() {
    let doc = parse("Scenario: Smoke\nGiven a user\n").expect("document should parse");
    assert_eq!(doc.language, "en");
}

#[test]
fn localised_steps_match_definitions_through_localised_keywords() {
    let doc = parse(FRENCH).expect("French document should parse");
    let mut registry = DefinitionRegistry::new();
    registry.register(
        "Given_un_utilisateur_inscrit",
        StepKind::Given,
        Vec::new(),
        |_| Ok(()),
    );
    registry.register(
        "When_l'utilisateur_se_connecte",
        StepKind::When,
        Vec::new(),
        |_| Ok(()),
    );
    registry.register(
        "When_la_session_démarre",
        StepKind::When,
        Vec::new(),
        |_| Ok(()),
    );
    registry.register(
        "Then_le_tableau_de_bord_apparaît",
        StepKind::Then,
        Vec::new(),
        |_| Ok(()),
    );

    let mut verifier = Verifier::with_keywords(&registry, KeywordSet::for_language(&doc.language));
    let report = verifier.verify_document(&doc);
    assert!(report.passed(), "report should pass: {report}");
}

#[test]
fn an_unknown_language_falls_back_to_english_parsing() {
    let doc = parse("# language: zz\nScenario: Smoke\nGiven a user\n")
        .expect("document should parse with English keywords");
    assert_eq!(doc.language, "zz");
    let scenario = doc.scenarios.first().expect("scenario should be present");
    assert_eq!(
        scenario.steps.first().map(|s| s.kind),
        Some(StepKind::Given)
    );
}
