//! Rendering of parsed rules into PAN-OS policy representations.
//!
//! Two independent strategies implement [`Renderer`]:
//!
//! - [`set_commands::SetCommandRenderer`]: flat `set` command list.
//! - [`panorama::PanoramaRenderer`]: Panorama XML document.
//!
//! They share only the semantic mapping helpers in this module: action and
//! service naming, descriptions, and the expansion of group references into
//! materialized member names.

pub mod panorama;
pub mod set_commands;

use serde::Deserialize;
use thiserror::Error;
use xml_tree_core::WriteError;

use crate::objects::ObjectTable;
use crate::rule::{AddressTerm, NumberedRule, Rule};

pub use panorama::PanoramaRenderer;
pub use set_commands::SetCommandRenderer;

/// Tag applied to converted rules unless configured otherwise.
pub const DEFAULT_TAG: &str = "from-asa";

/// Value used for source-user and for services without a port match.
pub const ANY: &str = "any";

/// Target representation selected by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PAN-OS `set` commands.
    #[default]
    Set,
    /// Panorama XML document.
    Xml,
}

/// Options shared by both renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Attach a description and a tag to every rule.
    pub include_tags: bool,
    pub tag_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_tags: true,
            tag_name: DEFAULT_TAG.to_string(),
        }
    }
}

/// Errors raised while producing output bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Xml(#[from] WriteError),
}

/// A target policy representation.
pub trait Renderer {
    /// Render all rules plus the materialized objects and groups they rely on.
    fn render(
        &self,
        rules: &[NumberedRule],
        table: &ObjectTable,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, RenderError>;
}

/// Source or destination value as it appears in a rendered rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedAddress<'a> {
    Single(&'a str),
    /// Materialized member names of a group, in member order.
    List(Vec<String>),
}

impl RenderedAddress<'_> {
    /// Values in order; a single value yields one item.
    pub fn values(&self) -> Vec<&str> {
        match self {
            RenderedAddress::Single(value) => vec![*value],
            RenderedAddress::List(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Decide how an address term is referenced from a rule.
///
/// Groups expand to their `{group}_{n}` member names. A group with no members
/// has nothing to expand and is referenced by its own name.
pub fn resolve_address<'a>(term: &'a AddressTerm, table: &ObjectTable) -> RenderedAddress<'a> {
    match term {
        AddressTerm::Scalar(value) | AddressTerm::Unresolved(value) => {
            RenderedAddress::Single(value)
        }
        AddressTerm::Group(name) => match table.group(name) {
            Some(group) if !group.members.is_empty() => {
                RenderedAddress::List(group.member_names())
            }
            _ => RenderedAddress::Single(name),
        },
    }
}

/// `permit` (any case) maps to `allow`; everything else denies.
pub fn target_action(action: &str) -> &'static str {
    if action.eq_ignore_ascii_case("permit") {
        "allow"
    } else {
        "deny"
    }
}

/// `tcp-443` style service name, or `any` when there is no tcp/udp port match.
pub fn service_name(rule: &Rule) -> String {
    let has_port_proto = matches!(rule.protocol.as_str(), "tcp" | "udp");
    if has_port_proto && rule.port != ANY {
        format!("{}-{}", rule.protocol, rule.port)
    } else {
        ANY.to_string()
    }
}

/// Description attached to tagged rules.
pub fn description(rule_name: &str) -> String {
    format!("Converted from ASA rule: {rule_name}")
}

/// Renderer for the requested format.
pub fn renderer_for(format: OutputFormat, device_group: &str) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Set => Box::new(SetCommandRenderer),
        OutputFormat::Xml => Box::new(PanoramaRenderer::new(device_group)),
    }
}
