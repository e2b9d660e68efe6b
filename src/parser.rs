//! rdbunit line grammar using nom.
//!
//! A test script is line oriented. Outside of blocks only directives are
//! accepted; inside blocks lines are table declarations, column lists or
//! data rows.
//!
//! # Syntax Overview
//!
//! ```text
//! BEGIN SETUP                 -- preconditions
//! sales.orders:               -- table declaration (optionally db-qualified)
//! id  customer  total         -- column names
//! 1   "Jane Doe"  12.5        -- data row (shell-style tokens)
//! END
//! BEGIN SELECT                -- or BEGIN CREATE / INCLUDE SELECT <file>
//! SELECT customer FROM sales.orders;
//! END
//! BEGIN RESULT                -- or BEGIN ORDERED RESULT
//! customer
//! "Jane Doe"
//! END
//! ```

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{is_not, tag, take_while},
    character::complete::{anychar, char, multispace0, multispace1, one_of},
    combinator::{all_consuming, map, rest, value, verify},
    multi::{many0, many1},
    sequence::{delimited, preceded, terminated},
};

/// Kind of the statement under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Side-effecting SQL; the RESULT block names the table to check.
    Create,
    /// A query; its rows are captured in a view.
    Select,
}

/// A top-level directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    BeginSetup,
    BeginCreate,
    BeginSelect,
    BeginResult { ordered: bool },
    Include { kind: StatementKind, path: &'a str },
    End,
}

/// Parse a directive line, returning `None` for anything else.
pub fn parse_directive(line: &str) -> Option<Directive<'_>> {
    all_consuming(directive)(line).ok().map(|(_, d)| d)
}

/// Return the declared table name of a `name:` line.
pub fn table_declaration(line: &str) -> Option<&str> {
    line.strip_suffix(':')
}

/// Split a data row into tokens the way a POSIX shell would.
///
/// Whitespace separates tokens, single quotes are literal, double quotes
/// honour `\"`, `\\`, `\$` and `` \` ``, and a backslash outside quotes
/// escapes the next character. Adjacent quoted and bare parts join.
pub fn shell_split(line: &str) -> Result<Vec<String>, String> {
    match all_consuming(words)(line) {
        Ok((_, tokens)) => Ok(tokens),
        Err(_) => Err(format!("unbalanced quotes or trailing escape in '{}'", line)),
    }
}

fn directive(input: &str) -> IResult<&str, Directive<'_>> {
    alt((
        value(Directive::BeginSetup, tag("BEGIN SETUP")),
        value(Directive::BeginCreate, tag("BEGIN CREATE")),
        value(Directive::BeginSelect, tag("BEGIN SELECT")),
        value(Directive::BeginResult { ordered: false }, tag("BEGIN RESULT")),
        value(
            Directive::BeginResult { ordered: true },
            tag("BEGIN ORDERED RESULT"),
        ),
        value(Directive::End, tag("END")),
        include,
    ))(input)
}

/// Parse `INCLUDE CREATE <path>` or `INCLUDE SELECT <path>`.
fn include(input: &str) -> IResult<&str, Directive<'_>> {
    let (input, _) = tag("INCLUDE")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, kind) = alt((
        value(StatementKind::Create, tag("CREATE")),
        value(StatementKind::Select, tag("SELECT")),
    ))(input)?;
    let (input, _) = multispace1(input)?;
    let (input, path) = verify(rest, |s: &str| !s.trim().is_empty())(input)?;

    Ok((
        input,
        Directive::Include {
            kind,
            path: path.trim(),
        },
    ))
}

fn words(input: &str) -> IResult<&str, Vec<String>> {
    preceded(multispace0, many0(terminated(word, multispace0)))(input)
}

fn word(input: &str) -> IResult<&str, String> {
    map(
        many1(alt((single_quoted, double_quoted, escaped, bare))),
        |parts: Vec<String>| parts.concat(),
    )(input)
}

fn single_quoted(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        str::to_string,
    )(input)
}

fn double_quoted(input: &str) -> IResult<&str, String> {
    let part = alt((
        map(preceded(char('\\'), one_of("\"\\$`")), String::from),
        map(is_not("\"\\"), str::to_string),
        map(char('\\'), String::from),
    ));
    map(
        delimited(char('"'), many0(part), char('"')),
        |parts: Vec<String>| parts.concat(),
    )(input)
}

fn escaped(input: &str) -> IResult<&str, String> {
    map(preceded(char('\\'), anychar), String::from)(input)
}

fn bare(input: &str) -> IResult<&str, String> {
    map(is_not(" \t\r\n'\"\\"), str::to_string)(input)
}
