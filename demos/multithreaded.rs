use std::sync::Arc;
use std::thread;

use parsan::rfc1035_grammar;

fn main() {
    let (grammar, subdomain) = rfc1035_grammar().expect("failed to build grammar");
    let grammar = Arc::new(grammar);

    let handles: Vec<_> = ["alpha@one", "beta_two", "3gamma", "delta."]
        .into_iter()
        .enumerate()
        .map(|(i, input)| {
            let grammar = Arc::clone(&grammar);
            let subdomain = subdomain.clone();
            thread::spawn(move || {
                let out = grammar.parse_and_sanitize(input, &subdomain);
                println!("Thread {i}: {input} -> {out:?}");
                out
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }
}
