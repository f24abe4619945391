use parsan::{
    concat, ldh_str, let_dig, letter, lower_ldh_str, rfc1035_grammar, rfc1035_label,
    rfc1035_subdomain, suggest_lower_letter, terminal, GrammarBuilder, RFC1035_MAX_LENGTH,
    RFC1035_SUBDOMAIN,
};

fn subdomain(input: &str) -> Vec<String> {
    let (grammar, rule) = rfc1035_grammar().unwrap();
    grammar.parse_and_sanitize(input, &rule)
}

#[test]
fn subdomain_is_registered_by_name() {
    let (grammar, _) = rfc1035_grammar().unwrap();
    assert!(grammar.names().contains(&RFC1035_SUBDOMAIN));
    assert_eq!(
        grammar.sanitize(RFC1035_SUBDOMAIN, "www.example").unwrap(),
        vec!["www.example"]
    );
}

#[test]
fn multi_label_names_pass_through() {
    assert_eq!(subdomain("a.b.c"), vec!["a.b.c"]);
    assert_eq!(subdomain("x1-y2.z"), vec!["x1-y2.z"]);
}

#[test]
fn interior_characters_become_hyphens() {
    assert_eq!(subdomain("a_b"), vec!["a-b"]);
    assert_eq!(subdomain("a b c"), vec!["a-b-c"]);
}

#[test]
fn every_variant_of_repeated_at_signs() {
    assert_eq!(
        subdomain("a@b@c"),
        vec!["a-at-b-at-c", "a-at-b-c", "a-b-at-c", "a-b-c"]
    );
}

#[test]
fn empty_input_gets_a_placeholder_letter() {
    assert_eq!(subdomain(""), vec!["x"]);
}

#[test]
fn results_never_exceed_the_ceiling() {
    let input = format!("{}@b", "a".repeat(60));
    let out = subdomain(&input);
    assert!(!out.is_empty());
    assert!(out.iter().all(|s| s.len() <= RFC1035_MAX_LENGTH));
    assert!(!out.iter().any(|s| s.contains("-at-")));
}

#[test]
fn subdomains_can_be_embedded_in_larger_grammars() {
    let mut builder = GrammarBuilder::new();
    let host = rfc1035_subdomain(&mut builder).unwrap();
    let service = builder.named("service", concat([terminal("svc/"), host]));
    let grammar = builder.build();
    assert_eq!(
        grammar.parse_and_sanitize("svc/db@1", &service),
        vec!["svc/db-at-1", "svc/db-1"]
    );
}

#[test]
fn label_alone_rejects_dots() {
    let mut builder = GrammarBuilder::new();
    let label = rfc1035_label(&mut builder, None).unwrap();
    let grammar = builder.build();
    assert!(grammar.parse_and_sanitize("a.b", &label).is_empty());
    assert_eq!(grammar.parse_and_sanitize("ab1", &label), vec!["ab1"]);
}

#[test]
fn character_class_building_blocks() {
    let mut builder = GrammarBuilder::new();
    let ldh = ldh_str(&mut builder, None).unwrap();
    let lower = lower_ldh_str(&mut builder, Some(suggest_lower_letter())).unwrap();
    let rule = letter(None).then(ldh).then(let_dig(None));
    let grammar = builder.build();

    assert_eq!(grammar.parse_and_sanitize("a--1", &rule), vec!["a--1"]);
    assert_eq!(grammar.parse_and_sanitize("AB-C", &lower), vec!["ab-c"]);
}
