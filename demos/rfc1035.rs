use parsan::{rfc1035_grammar, RFC1035_MAX_LENGTH};

fn main() {
    let (grammar, subdomain) = rfc1035_grammar().expect("failed to build grammar");
    println!("{subdomain}");

    let long = "x".repeat(100);
    let inputs = ["example.com", "foo@bar", "9lives", "my_host.local", long.as_str()];
    for input in inputs {
        let out = grammar.parse_and_sanitize(input, &subdomain);
        match out.first() {
            Some(best) => println!("{input} -> {best} ({} candidates)", out.len()),
            None => println!("{input} -> no repair"),
        }
    }

    println!("ceiling: {RFC1035_MAX_LENGTH} bytes");
}
