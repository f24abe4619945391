/// A grammar expression as written in DSL text, before it is lowered to [`Rule`](crate::Rule)s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal(String),
    Range(char, char),
    Ref(String),
    Concat(Vec<Node>),
    Alternative(Vec<Node>),
    Repeat {
        node: Box<Node>,
        min: usize,
        max: Option<usize>,
    },
    Suggest {
        node: Box<Node>,
        suggestion: String,
    },
}

/// One `name [(max N)] = body ;` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub max_length: Option<usize>,
    pub body: Node,
}

/// The result of parsing a DSL input string.
#[derive(Debug)]
pub struct ParsedGrammar {
    pub definitions: Vec<Definition>,
}
