//! Access-list line parsing into normalized [`Rule`] records.
//!
//! Parsing is token-position based. Object references resolve against the
//! [`ObjectTable`] immediately; group references are only classified here and
//! expanded by the renderers.

use std::fmt;

use thiserror::Error;

use crate::address::{is_dotted_quad, normalize};
use crate::objects::ObjectTable;

/// Zone name used when a line carries no `<from> to <to>` clause.
pub const UNKNOWN_ZONE: &str = "UNKNOWN";

/// Which address term of a rule an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Destination => write!(f, "destination"),
        }
    }
}

/// Reasons an access-list line cannot be turned into a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("line does not start with access-list")]
    NotAccessList,
    #[error("missing access-list name")]
    MissingAclName,
    #[error("missing zone after 'to'")]
    MissingZone,
    #[error("missing action")]
    MissingAction,
    #[error("missing protocol")]
    MissingProtocol,
    #[error("missing {side} address")]
    MissingAddress { side: Side },
    #[error("missing value after '{keyword}' in {side} address")]
    MissingOperand { side: Side, keyword: &'static str },
}

/// A source or destination address as written in the rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressTerm {
    /// A concrete address: host literal, normalized pair, or resolved object value.
    Scalar(String),
    /// Reference to an address group present in the object table.
    Group(String),
    /// Literal passed through as-is (`any`, or a name the table does not know).
    Unresolved(String),
}

/// One normalized access-control entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub acl_name: String,
    pub from_zone: String,
    pub to_zone: String,
    /// Source action token as written (`permit`, `deny`, ...).
    pub action: String,
    pub protocol: String,
    pub source: AddressTerm,
    pub destination: AddressTerm,
    /// Port from an `eq` match, or `any`.
    pub port: String,
}

/// A rule together with its 1-based position among access-control lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedRule {
    pub index: usize,
    pub rule: Rule,
}

impl NumberedRule {
    /// Unique rule name in the target policy: `{acl_name}_{index}`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.rule.acl_name, self.index)
    }
}

/// True when the line is an access-control line that should become a rule.
///
/// `remark` entries are comments attached to an access-list and are not rules.
pub fn is_access_control_line(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("access-list") {
        return false;
    }
    tokens.nth(1) != Some("remark")
}

/// Parse one access-list line.
pub fn parse_rule(line: &str, table: &ObjectTable) -> Result<Rule, RuleParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.first() != Some(&"access-list") {
        return Err(RuleParseError::NotAccessList);
    }
    let acl = tokens.get(1).ok_or(RuleParseError::MissingAclName)?;

    let (acl_name, from_zone, to_zone, mut rest) =
        match tokens.iter().skip(1).position(|t| *t == "to") {
            Some(offset) => {
                let to_idx = offset + 1;
                let from = acl.to_uppercase();
                let to = tokens
                    .get(to_idx + 1)
                    .ok_or(RuleParseError::MissingZone)?
                    .to_uppercase();
                let rest = tokens.get(to_idx + 2..).unwrap_or_default();
                (format!("{from}_TO_{to}"), from, to, rest)
            }
            None => (
                (*acl).to_string(),
                UNKNOWN_ZONE.to_string(),
                UNKNOWN_ZONE.to_string(),
                &tokens[2..],
            ),
        };

    if rest.first() == Some(&"extended") {
        rest = &rest[1..];
    }

    let action = rest.first().ok_or(RuleParseError::MissingAction)?;
    let protocol = rest.get(1).ok_or(RuleParseError::MissingProtocol)?;
    let mut cursor = TokenCursor {
        tokens: rest,
        pos: 2,
    };
    let source = cursor.address_term(Side::Source, table)?;
    let destination = cursor.address_term(Side::Destination, table)?;
    let port = cursor.eq_port().unwrap_or("any");

    Ok(Rule {
        acl_name,
        from_zone,
        to_zone,
        action: (*action).to_string(),
        protocol: (*protocol).to_string(),
        source,
        destination,
        port: port.to_string(),
    })
}

struct TokenCursor<'a> {
    tokens: &'a [&'a str],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    fn peek(&self, ahead: usize) -> Option<&'a str> {
        self.tokens.get(self.pos + ahead).copied()
    }

    fn operand(&self, side: Side, keyword: &'static str) -> Result<&'a str, RuleParseError> {
        self.peek(1)
            .ok_or(RuleParseError::MissingOperand { side, keyword })
    }

    fn address_term(
        &mut self,
        side: Side,
        table: &ObjectTable,
    ) -> Result<AddressTerm, RuleParseError> {
        let head = self.peek(0).ok_or(RuleParseError::MissingAddress { side })?;
        let (term, consumed) = match head {
            "host" => (
                AddressTerm::Scalar(self.operand(side, "host")?.to_string()),
                2,
            ),
            "object" => {
                let name = self.operand(side, "object")?;
                let term = match table.object(name) {
                    Some(value) => AddressTerm::Scalar(value.to_string()),
                    None => AddressTerm::Unresolved(name.to_string()),
                };
                (term, 2)
            }
            "object-group" => {
                let name = self.operand(side, "object-group")?;
                let term = if table.group(name).is_some() {
                    AddressTerm::Group(name.to_string())
                } else {
                    AddressTerm::Unresolved(name.to_string())
                };
                (term, 2)
            }
            addr if is_dotted_quad(addr) => match self.peek(1).filter(|m| is_dotted_quad(m)) {
                Some(mask) => (AddressTerm::Scalar(normalize(addr, mask)), 2),
                None => (AddressTerm::Unresolved(addr.to_string()), 1),
            },
            literal => (AddressTerm::Unresolved(literal.to_string()), 1),
        };
        self.pos += consumed;
        Ok(term)
    }

    fn eq_port(&self) -> Option<&'a str> {
        match self.peek(0) {
            Some("eq") => self.peek(1),
            _ => None,
        }
    }
}
