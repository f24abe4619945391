use parsan::{
    suggest_const_rune_unless, suggest_lower_letter, unless_suggestion_func, GrammarBuilder,
};

fn main() {
    let mut builder = GrammarBuilder::new();
    builder
        .suggestion("lower", suggest_lower_letter())
        .suggestion(
            "hyphen",
            unless_suggestion_func(suggest_lower_letter(), suggest_const_rune_unless('-', '.')),
        );

    let source = std::fs::read_to_string("demos/service-names.parsan")
        .expect("failed to read grammar file");
    builder.load_dsl(&source).expect("failed to load grammar");
    let grammar = builder.build();

    println!("{grammar}: {:?}", grammar.names());

    for input in ["billing", "Billing_API", "user service", "web-"] {
        match grammar.sanitize("name", input) {
            Ok(out) => println!("{input:>14} -> {out:?}"),
            Err(e) => println!("{input:>14} -> error: {e}"),
        }
    }
}
