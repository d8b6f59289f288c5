/*!
 * Tests for inline markup normalization
 */

use wordwell::dictionary::{MarkupNormalizer, MarkupRule, MarkupRuleSpec, normalize};

#[test]
fn test_normalize_withControlToken_shouldRemoveIt() {
    assert_eq!(normalize("{bc}abc{bc}"), "abc");
}

#[test]
fn test_normalize_withCrossReference_shouldKeepDisplayText() {
    assert_eq!(normalize("{d_link|run|run:1}"), "run");
    assert_eq!(
        normalize("{bc}a member of the {d_link|cat family|cat:1} and kin"),
        "a member of the cat family and kin"
    );
}

#[test]
fn test_normalize_withItalicSpan_shouldKeepText() {
    assert_eq!(normalize("{it}fast{/it} car"), "fast car");
    assert_eq!(normalize("{it}a{/it} and {it}b{/it}"), "a and b");
}

#[test]
fn test_normalize_withSurroundingWhitespace_shouldTrim() {
    assert_eq!(normalize("  \t{bc} plain words \n"), "plain words");
}

#[test]
fn test_normalize_withUnknownTokens_shouldPassThrough() {
    assert_eq!(normalize("{hl}cat{/hl}"), "{hl}cat{/hl}");
    assert_eq!(normalize("{d_link|missing target}"), "{d_link|missing target}");
    assert_eq!(normalize("{it}never closed"), "{it}never closed");
}

#[test]
fn test_normalize_withArbitraryInputs_shouldBeIdempotent() {
    let inputs = [
        "",
        "   ",
        "{bc}",
        "{bc}{bc}{bc}",
        "{{bc}bc}",
        "{it}{d_link|x|y}{/it}",
        "{d_link|{it}z{/it}|q}",
        "{ldquo}{it}quoted{/it}{rdquo} said {a_link|someone}",
        "text with } stray { braces",
    ];

    for input in inputs {
        let once = normalize(input);
        let twice = normalize(&once);
        assert_eq!(once, twice, "normalize not idempotent for {:?}", input);
    }
}

#[test]
fn test_normalize_withDeeplyNestedControlTokens_shouldStripAllAndBeIdempotent() {
    let mut nested = "{bc}".to_string();
    for _ in 0..20 {
        nested = format!("{{b{}c}}", nested);
    }
    nested.push_str(" tail");

    let once = normalize(&nested);
    assert_eq!(once, "tail");
    assert_eq!(normalize(&once), once);
}

#[test]
fn test_normalize_withCollegiateFormattingTokens_shouldKeepText() {
    assert_eq!(normalize("{bc}the {wi}cat{/wi} sat"), "the cat sat");
    assert_eq!(
        normalize("Middle English, from {et_link|cat:1|cat:1} {ma}{mat|kitten|}{/ma}"),
        "Middle English, from cat kitten"
    );
    assert_eq!(
        normalize("{dx}see {dxt|feline||}{/dx} and {sc}felis{/sc}"),
        "see feline and felis"
    );
    assert_eq!(
        normalize("{b}H{/b}{inf}2{/inf}O{sup}x{/sup} {gloss}water{/gloss} {parahw}x{/parahw} {phrase}y{/phrase} {qword}z{/qword}"),
        "H2Ox water x y z"
    );
}

#[test]
fn test_normalizer_withGrowingCustomRule_shouldStop() {
    let mut normalizer = MarkupNormalizer::empty();
    normalizer.push_rule(MarkupRule::new("grow", "x", "xx").unwrap());

    let result = normalizer.normalize("x");
    assert!(result.chars().all(|c| c == 'x'));
}

#[test]
fn test_normalizer_empty_shouldOnlyTrim() {
    let normalizer = MarkupNormalizer::empty();
    assert_eq!(normalizer.normalize("  {bc}x "), "{bc}x");
}

#[test]
fn test_normalizer_pushRule_shouldApplyCustomRule() {
    let mut normalizer = MarkupNormalizer::standard();
    normalizer.push_rule(MarkupRule::new("hl", r"\{hl\}(.*?)\{/hl\}", "$1").unwrap());

    assert_eq!(normalizer.normalize("{bc}a {hl}cat{/hl} on the mat"), "a cat on the mat");
    assert_eq!(normalizer.rules().last().map(|r| r.name()), Some("hl"));
}

#[test]
fn test_markupRuleSpec_fromJson_shouldDefaultReplacement() {
    let spec: MarkupRuleSpec = serde_json::from_str(r#"{"name":"dx","pattern":"\\{/?dx\\}"}"#).unwrap();
    assert_eq!(spec.replacement, "");

    let normalizer = MarkupNormalizer::with_extra_rules(&[spec]).unwrap();
    assert_eq!(normalizer.normalize("see {dx}cat{/dx}"), "see cat");
}
