use crate::scan::{is_identifier, matching_paren};
use crate::types::{parse_type_string, split_top_level, TypeDescriptor};

/// A function header recovered from its declaration line.
#[derive(Debug, Clone)]
pub struct ParsedSignature {
    pub name: String,
    pub parameters: Vec<ParsedParameter>,
    /// `None` when the header carries no return annotation; callers treat
    /// that as `Unit`.
    pub return_type: Option<TypeDescriptor>,
}

#[derive(Debug, Clone)]
pub struct ParsedParameter {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// Matches `[io] fun name(param: Type, ...) [: ReturnType] {` against a
/// single line. Anything that does not fit the shape yields `None` and is
/// simply not a function header.
pub fn parse_function_signature(line: &str) -> Option<ParsedSignature> {
    let trimmed = line.trim();
    let trimmed = match trimmed.strip_prefix("io ") {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    };
    let rest = trimmed.strip_prefix("fun ")?;
    let open = rest.find('(')?;
    let name = rest[..open].trim();
    if !is_identifier(name) {
        return None;
    }
    let close = matching_paren(rest, open)?;

    let parameters = split_top_level(&rest[open + 1..close], ',')
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(parse_parameter)
        .collect();

    let tail = rest[close + 1..].trim().trim_end_matches('{').trim();
    let return_type = tail
        .strip_prefix(':')
        .map(str::trim)
        .filter(|annotation| !annotation.is_empty())
        .map(parse_type_string);

    Some(ParsedSignature {
        name: name.to_string(),
        parameters,
        return_type,
    })
}

fn parse_parameter(piece: &str) -> ParsedParameter {
    match piece.split_once(':') {
        Some((name, annotation)) => ParsedParameter {
            name: name.trim().to_string(),
            ty: parse_type_string(annotation),
        },
        None => ParsedParameter {
            name: piece.trim().to_string(),
            ty: TypeDescriptor::unknown(),
        },
    }
}
