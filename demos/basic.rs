use parsan::{
    concat, parse_and_sanitize, range, suggest_const_rune, suggest_lower_letter, terminal,
    GrammarBuilder, SEQ_INF,
};

fn main() {
    // A single lowercase letter; anything else becomes 'a'.
    let lower = range('a', 'z')
        .with_suggestion(suggest_const_rune('a'))
        .expect("ranges accept suggestions");
    println!("{lower}");
    println!("{:?}", parse_and_sanitize("A", &lower));

    // key=value with lowercase keys; repetition needs a builder because the
    // unbounded tail is a named rule.
    let mut builder = GrammarBuilder::new();
    let key_char = range('a', 'z')
        .with_suggestion(suggest_lower_letter())
        .expect("ranges accept suggestions");
    let key = builder
        .seq(1, SEQ_INF, key_char)
        .expect("failed to name repetition");
    let value = builder
        .seq(0, SEQ_INF, range('0', '9'))
        .expect("failed to name repetition");
    let pair = builder.named("pair", concat([key, terminal("="), value]));
    let grammar = builder.build();

    println!("{grammar}");
    for input in ["port=8080", "Port=80", "PORT=", "port:80"] {
        let out = grammar.parse_and_sanitize(input, &pair);
        if out.is_empty() {
            println!("{input:>10} -> no repair");
        } else {
            println!("{input:>10} -> {out:?}");
        }
    }
}
