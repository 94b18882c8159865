use super::common::*;
use crate::workflows::tours::preference::{Preference, RotatingPreference};

#[test]
fn fixed_preferences_answer_the_same_twice() {
    let lively = lively_place("PNA");
    let calm = calm_place("MAZ");

    let mut lively_lover = Preference::Lively;
    assert!(lively_lover.likes(&lively));
    assert!(lively_lover.likes(&lively));
    assert!(!lively_lover.likes(&calm));
    assert!(!lively_lover.likes(&calm));
    assert_eq!(lively_lover, Preference::Lively);

    let mut calm_lover = Preference::Calm;
    assert!(calm_lover.likes(&calm));
    assert!(calm_lover.likes(&calm));
    assert!(!calm_lover.likes(&lively));
}

#[test]
fn rotating_hands_over_after_a_like() {
    let calm = calm_place("MAZ");
    let mut rotating = RotatingPreference::new(Preference::Calm, Preference::Lively);

    assert!(rotating.likes(&calm));
    assert_eq!(rotating.active(), &Preference::Lively);
    assert_eq!(rotating.next(), &Preference::Calm);

    assert!(
        !rotating.likes(&calm),
        "second query goes to the lively policy"
    );
}

#[test]
fn rotating_keeps_its_turn_after_a_dislike() {
    let lively = lively_place("PNA");
    let mut rotating = RotatingPreference::new(Preference::Calm, Preference::Lively);

    assert!(!rotating.likes(&lively));
    assert!(!rotating.likes(&lively));
    assert_eq!(rotating.active(), &Preference::Calm);
}

#[test]
fn bipolar_starts_calm() {
    match Preference::bipolar() {
        Preference::Rotating(rotating) => {
            assert_eq!(rotating.active(), &Preference::Calm);
            assert_eq!(rotating.next(), &Preference::Lively);
        }
        other => panic!("expected rotating preference, got {other:?}"),
    }
}

#[test]
fn any_of_skips_a_rotating_option_that_dislikes() {
    let calm = calm_place("MAZ");
    let rotating = RotatingPreference::new(Preference::Lively, Preference::Calm);
    let mut composite = Preference::AnyOf(vec![
        Preference::Rotating(rotating.clone()),
        Preference::Calm,
    ]);

    assert!(composite.likes(&calm));
    match &composite {
        Preference::AnyOf(options) => assert_eq!(options[0], Preference::Rotating(rotating)),
        other => panic!("unexpected preference {other:?}"),
    }
}

#[test]
fn any_of_never_consults_options_after_a_match() {
    let calm = calm_place("MAZ");
    let untouched = RotatingPreference::new(Preference::Calm, Preference::Lively);
    let mut composite = Preference::AnyOf(vec![
        Preference::Calm,
        Preference::Rotating(untouched.clone()),
    ]);

    assert!(composite.likes(&calm));
    match &composite {
        Preference::AnyOf(options) => {
            assert_eq!(options[1], Preference::Rotating(untouched));
        }
        other => panic!("unexpected preference {other:?}"),
    }
}

#[test]
fn any_of_rejects_when_every_option_dislikes() {
    let dull = dull_place("COR");
    let mut composite = Preference::AnyOf(vec![
        Preference::Calm,
        Preference::Lively,
        Preference::bipolar(),
    ]);
    assert!(!composite.likes(&dull));

    let mut empty = Preference::AnyOf(Vec::new());
    assert!(!empty.likes(&dull));
}

#[test]
fn preferences_deserialize_from_scenario_shape() {
    let raw = r#"{ "any_of": ["lively", { "rotating": { "active": "calm", "next": "lively" } }] }"#;
    let preference: Preference = serde_json::from_str(raw).expect("preference parses");
    assert_eq!(
        preference,
        Preference::AnyOf(vec![Preference::Lively, Preference::bipolar()])
    );
}
