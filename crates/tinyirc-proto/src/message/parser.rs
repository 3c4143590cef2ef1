//! Nom-based line parser.
//!
//! Produces borrowed slices into the input; see [`super::MessageRef`] for the
//! public view.

use nom::{
    bytes::complete::{take_until, take_while1},
    character::complete::{char, space0},
    combinator::opt,
    error::ErrorKind,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

/// Maximum number of parameters a line may carry.
pub const MAX_PARAMS: usize = 15;

pub(crate) type Params<'a> = SmallVec<[&'a str; MAX_PARAMS]>;

/// Message tags (`@...`) are skipped; the server attaches no meaning to them.
fn parse_tags(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), take_until(" "))(input)
}

fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Command is 1*letter or exactly 3 digits.
fn parse_command(input: &str) -> IResult<&str, &str> {
    let (rest, cmd) = take_while1(|c: char| c.is_ascii_alphanumeric())(input)?;

    let is_all_letters = cmd.chars().all(|c| c.is_ascii_alphabetic());
    let is_three_digits = cmd.len() == 3 && cmd.chars().all(|c| c.is_ascii_digit());

    if is_all_letters || is_three_digits {
        Ok((rest, cmd))
    } else {
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::AlphaNumeric,
        )))
    }
}

/// Space separated middle parameters, then an optional `:trailing` that may
/// contain spaces. Runs of spaces count as one separator. Anything past
/// [`MAX_PARAMS`] is dropped.
fn parse_params(input: &str) -> Params<'_> {
    let mut params = Params::new();
    let mut rest = input;

    while rest.starts_with(' ') {
        if params.len() >= MAX_PARAMS {
            break;
        }

        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }

        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            break;
        }

        let end = rest.find(' ').unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }

    params
}

/// A parsed line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedLine<'a> {
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub params: Params<'a>,
}

/// `[@tags] [:prefix] <command> [params...] [:trailing]`
fn parse_message(input: &str) -> IResult<&str, ParsedLine<'_>> {
    let (input, _) = opt(parse_tags)(input)?;
    let (input, _) = space0(input)?;
    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, _) = space0(input)?;
    let (rest, command) = parse_command(input)?;
    let params = parse_params(rest);

    Ok((
        "",
        ParsedLine {
            prefix,
            command,
            params,
        },
    ))
}

/// Parse one line. The caller strips the line terminator first. On failure
/// returns the byte offset where parsing stopped.
pub(crate) fn parse_line(input: &str) -> Result<ParsedLine<'_>, usize> {
    match parse_message(input) {
        Ok((_, line)) => Ok(line),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(input.len() - e.input.len()),
        Err(nom::Err::Incomplete(_)) => Err(input.len()),
    }
}
