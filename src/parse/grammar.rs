use winnow::ascii::{dec_uint, till_line_ending};
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::parser::{Definition, Node, ParsedGrammar};

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Identifiers & numbers --------------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '-'
        }),
    )
        .take()
        .parse_next(input)
}

fn count(input: &mut &str) -> ModalResult<usize> {
    dec_uint::<_, u32, _>
        .map(|n: u32| n as usize)
        .parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn escaped_char(input: &mut &str) -> ModalResult<char> {
    match any.parse_next(input)? {
        c @ ('"' | '\'' | '\\') => Ok(c),
        'n' => Ok('\n'),
        't' => Ok('\t'),
        _ => Err(ErrMode::from_input(input).cut()),
    }
}

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        match any.parse_next(input)? {
            '"' => return Ok(s),
            '\\' => s.push(escaped_char(input)?),
            c => s.push(c),
        }
    }
}

fn char_literal(input: &mut &str) -> ModalResult<char> {
    '\''.parse_next(input)?;
    let c = match any.parse_next(input)? {
        '\\' => escaped_char(input)?,
        c => c,
    };
    cut_err('\'')
        .context(StrContext::Expected(StrContextValue::CharLiteral('\'')))
        .parse_next(input)?;
    Ok(c)
}

fn char_range(input: &mut &str) -> ModalResult<Node> {
    let low = char_literal.parse_next(input)?;
    let high = opt(preceded((ws, ".."), cut_err(preceded(ws, char_literal)))).parse_next(input)?;
    Ok(Node::Range(low, high.unwrap_or(low)))
}

// -- Expressions (precedence: alternation < sequence < postfix < atom) ------

fn atom(input: &mut &str) -> ModalResult<Node> {
    ws.parse_next(input)?;
    alt((
        string_literal.map(Node::Literal),
        char_range,
        delimited('(', alternation, (ws, cut_err(')'))),
        ident.map(|name: &str| Node::Ref(name.to_owned())),
    ))
    .parse_next(input)
}

fn braces(input: &mut &str) -> ModalResult<(usize, Option<usize>)> {
    '{'.parse_next(input)?;
    ws.parse_next(input)?;
    let min = cut_err(count)
        .context(StrContext::Expected(StrContextValue::Description(
            "repetition count",
        )))
        .parse_next(input)?;
    ws.parse_next(input)?;
    let max = opt(preceded((',', ws), opt(count))).parse_next(input)?;
    ws.parse_next(input)?;
    cut_err('}').parse_next(input)?;
    Ok(match max {
        None => (min, Some(min)),
        Some(upper) => (min, upper),
    })
}

fn quantifier(input: &mut &str) -> ModalResult<(usize, Option<usize>)> {
    ws.parse_next(input)?;
    alt((
        '?'.value((0_usize, Some(1_usize))),
        '*'.value((0_usize, None)),
        '+'.value((1_usize, None)),
        braces,
    ))
    .parse_next(input)
}

fn postfix(input: &mut &str) -> ModalResult<Node> {
    let mut node = atom(input)?;
    if let Some(name) = opt(preceded((ws, '@'), cut_err(ident))).parse_next(input)? {
        node = Node::Suggest {
            node: Box::new(node),
            suggestion: name.to_owned(),
        };
    }
    if let Some((min, max)) = opt(quantifier).parse_next(input)? {
        node = Node::Repeat {
            node: Box::new(node),
            min,
            max,
        };
    }
    Ok(node)
}

fn sequence(input: &mut &str) -> ModalResult<Node> {
    let mut items: Vec<Node> = repeat(0.., postfix).parse_next(input)?;
    if items.len() == 1 {
        if let Some(only) = items.pop() {
            return Ok(only);
        }
    }
    Ok(Node::Concat(items))
}

fn alternation(input: &mut &str) -> ModalResult<Node> {
    let first = sequence(input)?;
    let rest: Vec<Node> =
        repeat(0.., preceded((ws, '|'), cut_err(sequence))).parse_next(input)?;
    if rest.is_empty() {
        return Ok(first);
    }
    let mut branches = Vec::with_capacity(rest.len() + 1);
    branches.push(first);
    branches.extend(rest);
    Ok(Node::Alternative(branches))
}

// -- Definitions ------------------------------------------------------------

fn max_annotation(input: &mut &str) -> ModalResult<usize> {
    delimited(
        (ws, '(', ws, "max", ws),
        cut_err(count),
        (ws, cut_err(')')),
    )
    .parse_next(input)
}

fn definition(input: &mut &str) -> ModalResult<Definition> {
    ws.parse_next(input)?;
    let name = ident.parse_next(input)?;

    let max_length = opt(max_annotation).parse_next(input)?;

    ws.parse_next(input)?;
    cut_err('=')
        .context(StrContext::Expected(StrContextValue::CharLiteral('=')))
        .parse_next(input)?;

    let body = cut_err(alternation)
        .context(StrContext::Expected(StrContextValue::Description(
            "rule body",
        )))
        .parse_next(input)?;

    ws.parse_next(input)?;
    cut_err(';')
        .context(StrContext::Expected(StrContextValue::CharLiteral(';')))
        .parse_next(input)?;

    Ok(Definition {
        name: name.to_owned(),
        max_length,
        body,
    })
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_grammar(input: &mut &str) -> ModalResult<ParsedGrammar> {
    let definitions: Vec<Definition> = repeat(0.., definition).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(ParsedGrammar { definitions })
}
