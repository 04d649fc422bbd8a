//! Builder command parser using nom.
//!
//! Each line drives one builder step:
//!
//! ```text
//! select
//! fields region, p.name as product
//! sum    amount, qty
//! from   sales
//! build
//! ─┬──── ─────────┬──────────────
//!  │              └── Arguments (comma list, table, or cast pair)
//!  └── Keyword (case-insensitive)
//! ```

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag_no_case, take_till1},
    character::complete::{space0, space1},
    combinator::{eof, map, not, peek, rest, value},
    sequence::{preceded, terminated, tuple},
};

use crate::ast::AggregateFunc;
use crate::error::{QueryError, QueryResult};
use crate::session::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    New,
    Reset,
    Select,
    Fields,
    Aggregate(AggregateFunc),
    From,
    SubQuery,
    Optional,
    Cast,
    Build,
    Show,
}

/// Parse a single command line.
///
/// # Example
/// ```
/// use aggq::parser::parse_command;
/// use aggq::session::Command;
///
/// let cmd = parse_command("fields a, b as c").unwrap();
/// assert_eq!(cmd, Command::Fields(vec!["a".into(), "b as c".into()]));
/// ```
pub fn parse_command(input: &str) -> QueryResult<Command> {
    let input = input.trim();
    if input.is_empty() {
        return Err(QueryError::parse(0, "Empty command"));
    }

    match parse_line(input) {
        Ok(("", cmd)) => Ok(cmd),
        Ok((remaining, _)) => Err(QueryError::parse(
            input.len() - remaining.len(),
            format!("Unexpected trailing content: '{}'", remaining.trim()),
        )),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(QueryError::parse(
            input.len() - e.input.len(),
            format!("Unknown or malformed command: '{}'", input),
        )),
        Err(nom::Err::Incomplete(_)) => Err(QueryError::parse(input.len(), "Incomplete command")),
    }
}

/// Whether a script line carries no command.
pub fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#') || line.starts_with("--")
}

fn parse_line(input: &str) -> IResult<&str, Command> {
    let (input, keyword) = parse_keyword(input)?;

    match keyword {
        Keyword::Fields => map(parse_list, Command::Fields)(input),
        Keyword::Aggregate(func) => map(parse_list, move |names| Command::Aggregate(func, names))(input),
        Keyword::From => map(rest, |t: &str| Command::From(t.trim().to_string()))(input),
        Keyword::Cast => parse_cast(input),
        Keyword::New => bare(input, Command::New),
        Keyword::Reset => bare(input, Command::Reset),
        Keyword::Select => bare(input, Command::Select),
        Keyword::SubQuery => bare(input, Command::SubQuery),
        Keyword::Optional => bare(input, Command::OptionalParam),
        Keyword::Build => bare(input, Command::Build),
        Keyword::Show => bare(input, Command::Show),
    }
}

/// Parse the leading keyword, which must end at a word boundary.
fn parse_keyword(input: &str) -> IResult<&str, Keyword> {
    terminated(
        alt((
            value(Keyword::New, tag_no_case("new")),
            value(Keyword::Reset, tag_no_case("reset")),
            value(Keyword::Select, tag_no_case("select")),
            value(Keyword::Fields, tag_no_case("fields")),
            value(Keyword::Aggregate(AggregateFunc::Sum), tag_no_case("sum")),
            value(Keyword::Aggregate(AggregateFunc::Avg), tag_no_case("avg")),
            value(Keyword::Aggregate(AggregateFunc::Count), tag_no_case("count")),
            value(Keyword::Aggregate(AggregateFunc::Min), tag_no_case("min")),
            value(Keyword::Aggregate(AggregateFunc::Max), tag_no_case("max")),
            value(Keyword::From, tag_no_case("from")),
            value(Keyword::SubQuery, tag_no_case("subquery")),
            value(Keyword::Optional, tag_no_case("optional")),
            value(Keyword::Cast, tag_no_case("cast")),
            value(Keyword::Build, tag_no_case("build")),
            value(Keyword::Show, tag_no_case("show")),
        )),
        not(peek(take_till1(|c: char| !(c.is_alphanumeric() || c == '_')))),
    )(input)
}

/// A keyword that takes no arguments.
fn bare(input: &str, cmd: Command) -> IResult<&str, Command> {
    let (input, _) = preceded(space0, eof)(input)?;
    Ok((input, cmd))
}

/// Parse a comma separated list. Items are trimmed and kept verbatim, even when
/// empty; a blank argument is the empty list.
fn parse_list(input: &str) -> IResult<&str, Vec<String>> {
    map(rest, |s: &str| {
        if s.trim().is_empty() {
            return Vec::new();
        }
        s.split(',').map(|item| item.trim().to_string()).collect()
    })(input)
}

/// Parse `cast <field> <type>`; the type runs to the end of the line.
fn parse_cast(input: &str) -> IResult<&str, Command> {
    let (input, (_, field, _, target_type)) = tuple((
        space1,
        take_till1(char::is_whitespace),
        space1,
        take_till1(|_: char| false),
    ))(input)?;

    Ok((
        input,
        Command::Cast {
            field: field.to_string(),
            target_type: target_type.trim().to_string(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bare_commands() {
        assert_eq!(parse_command("select").unwrap(), Command::Select);
        assert_eq!(parse_command("  SELECT  ").unwrap(), Command::Select);
        assert_eq!(parse_command("new").unwrap(), Command::New);
        assert_eq!(parse_command("reset").unwrap(), Command::Reset);
        assert_eq!(parse_command("build").unwrap(), Command::Build);
        assert_eq!(parse_command("show").unwrap(), Command::Show);
        assert_eq!(parse_command("subquery").unwrap(), Command::SubQuery);
        assert_eq!(parse_command("optional").unwrap(), Command::OptionalParam);
    }

    #[test]
    fn test_fields_list() {
        assert_eq!(
            parse_command("fields A, B ,tb.c as Name").unwrap(),
            Command::Fields(vec!["A".into(), "B".into(), "tb.c as Name".into()])
        );
        assert_eq!(parse_command("fields").unwrap(), Command::Fields(vec![]));
    }

    #[test]
    fn test_list_keeps_empty_items() {
        assert_eq!(
            parse_command("fields a,,b").unwrap(),
            Command::Fields(vec!["a".into(), "".into(), "b".into()])
        );
        assert_eq!(
            parse_command("sum x,").unwrap(),
            Command::Aggregate(AggregateFunc::Sum, vec!["x".into(), "".into()])
        );
    }

    #[test]
    fn test_aggregate_commands() {
        assert_eq!(
            parse_command("sum D,E").unwrap(),
            Command::Aggregate(AggregateFunc::Sum, vec!["D".into(), "E".into()])
        );
        assert_eq!(
            parse_command("Count id").unwrap(),
            Command::Aggregate(AggregateFunc::Count, vec!["id".into()])
        );
        assert_eq!(
            parse_command("max").unwrap(),
            Command::Aggregate(AggregateFunc::Max, vec![])
        );
    }

    #[test]
    fn test_from() {
        assert_eq!(
            parse_command("from  sales ").unwrap(),
            Command::From("sales".into())
        );
        assert_eq!(parse_command("from").unwrap(), Command::From(String::new()));
    }

    #[test]
    fn test_cast() {
        assert_eq!(
            parse_command("cast price double precision").unwrap(),
            Command::Cast {
                field: "price".into(),
                target_type: "double precision".into(),
            }
        );
        assert!(parse_command("cast price").is_err());
    }

    #[test]
    fn test_unknown_keyword() {
        let err = parse_command("delete everything").unwrap_err();
        assert!(matches!(err, QueryError::Parse { position: 0, .. }));
    }

    #[test]
    fn test_keyword_needs_word_boundary() {
        assert!(parse_command("selected").is_err());
        assert!(parse_command("summary a").is_err());
    }

    #[test]
    fn test_trailing_content_on_bare_command() {
        let err = parse_command("select a").unwrap_err();
        assert!(matches!(err, QueryError::Parse { .. }));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert!(is_blank_or_comment("   "));
        assert!(is_blank_or_comment("# note"));
        assert!(is_blank_or_comment("-- note"));
        assert!(!is_blank_or_comment("select"));
    }
}
