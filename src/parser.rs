//! Parse a single column type descriptor using PEST.

use crate::ast::{Descriptor, DescriptorKind};
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct DescriptorParser;

/// Reserved base-type prefix for fixed-width groups (`dict<N>`).
pub const GROUP_PREFIX: &str = "dict";

/// Parse one descriptor (`int`, `int[3]`, `dict<2>`, ...). Surrounding whitespace is ignored.
pub fn parse_descriptor(source: &str) -> Result<Descriptor, String> {
    let text = source.trim();
    if text.is_empty() {
        return Err("empty descriptor".to_string());
    }
    let pairs = DescriptorParser::parse(Rule::descriptor, text)
        .map_err(|e| format!("Parse error: {}", e))?;
    let descriptor = pairs.into_iter().next().ok_or("Empty parse")?;
    let shape = descriptor
        .into_inner()
        .find(|p| p.as_rule() != Rule::EOI)
        .ok_or("descriptor: missing type")?;

    let (base_type, kind) = match shape.as_rule() {
        Rule::array => {
            let (base, n) = build_sized(shape, Rule::array_base)?;
            (base, DescriptorKind::Array(n))
        }
        Rule::group => {
            let (base, n) = build_sized(shape, Rule::group_base)?;
            (base, DescriptorKind::Group(n))
        }
        Rule::scalar => {
            let base = shape
                .into_inner()
                .find(|p| p.as_rule() == Rule::scalar_base)
                .map(|p| p.as_str().to_string())
                .ok_or("scalar: missing base type")?;
            if base.starts_with(GROUP_PREFIX) {
                return Err(format!("`{}` needs a member count, e.g. `{}<2>`", base, GROUP_PREFIX));
            }
            (base, DescriptorKind::Leaf)
        }
        other => return Err(format!("unexpected descriptor rule: {:?}", other)),
    };

    Ok(Descriptor {
        text: text.to_string(),
        base_type,
        kind,
    })
}

fn build_sized(pair: pest::iterators::Pair<Rule>, base_rule: Rule) -> Result<(String, usize), String> {
    let mut base = None;
    let mut count = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            r if r == base_rule => base = Some(inner.as_str().to_string()),
            Rule::count => count = Some(parse_count(inner.as_str())?),
            _ => {}
        }
    }
    Ok((base.ok_or("missing base type")?, count.ok_or("missing count")?))
}

fn parse_count(s: &str) -> Result<usize, String> {
    s.parse::<usize>()
        .map_err(|_| format!("count `{}` out of range", s))
}
