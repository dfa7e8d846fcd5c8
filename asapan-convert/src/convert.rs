//! End-to-end conversion of ASA configuration lines into rendered output.
//!
//! ## Pipeline
//!
//! 1. **Object table**: collect objects and object-groups from every line.
//! 2. **Rules**: parse each access-control line in order, numbering them from 1.
//!    Malformed lines are handled by [`MalformedLinePolicy`].
//! 3. **Render**: hand the numbered rules and the table to the selected
//!    [`Renderer`](crate::render::Renderer).
//!
//! Nothing is written here; callers receive the rendered bytes and decide how to
//! commit them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::objects::ObjectTable;
use crate::render::panorama::DEFAULT_DEVICE_GROUP;
use crate::render::{renderer_for, OutputFormat, RenderError, RenderOptions};
use crate::rule::{is_access_control_line, parse_rule, NumberedRule, RuleParseError};
use crate::summary::{summarize, ConversionSummary};

/// What to do with an access-list line that cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Fail the whole conversion; no output is produced.
    #[default]
    Abort,
    /// Drop the line, report it, and keep converting.
    Skip,
}

/// Caller-facing conversion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    /// Panorama device group; only used for XML output.
    pub device_group: String,
    pub render: RenderOptions,
    pub on_malformed: MalformedLinePolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            device_group: DEFAULT_DEVICE_GROUP.to_string(),
            render: RenderOptions::default(),
            on_malformed: MalformedLinePolicy::default(),
        }
    }
}

/// An access-list line dropped under [`MalformedLinePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// Rule index the line would have had.
    pub index: usize,
    /// 1-based line number in the input.
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

/// Errors that stop a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("malformed access-list rule #{index} at line {line_number}: {source} ('{line}')")]
    MalformedRule {
        index: usize,
        line_number: usize,
        line: String,
        #[source]
        source: RuleParseError,
    },
    #[error("failed to render output: {0}")]
    Render(#[from] RenderError),
}

/// Numbered rules plus the lines that were skipped on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRules {
    pub rules: Vec<NumberedRule>,
    pub skipped: Vec<SkippedLine>,
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub output: Vec<u8>,
    pub summary: ConversionSummary,
    pub skipped: Vec<SkippedLine>,
}

/// Parse every access-control line in input order.
///
/// Rule indices count access-control lines only, so interleaved object
/// definitions never shift rule names. A skipped line still consumes its index.
pub fn parse_rules<S: AsRef<str>>(
    lines: &[S],
    table: &ObjectTable,
    policy: MalformedLinePolicy,
) -> Result<ParsedRules, ConvertError> {
    let mut parsed = ParsedRules::default();
    let access_lines = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_access_control_line(line.as_ref()));

    for (index, (line_idx, line)) in (1..).zip(access_lines) {
        let line: &str = line.as_ref();
        match parse_rule(line, table) {
            Ok(rule) => parsed.rules.push(NumberedRule { index, rule }),
            Err(source) => {
                let line_number = line_idx + 1;
                if policy == MalformedLinePolicy::Abort {
                    return Err(ConvertError::MalformedRule {
                        index,
                        line_number,
                        line: line.trim().to_string(),
                        source,
                    });
                }
                log::warn!("skipping access-list rule #{index} at line {line_number}: {source}");
                parsed.skipped.push(SkippedLine {
                    index,
                    line_number,
                    line: line.trim().to_string(),
                    reason: source.to_string(),
                });
            }
        }
    }

    log::debug!(
        "parsed {} rules, skipped {}",
        parsed.rules.len(),
        parsed.skipped.len()
    );
    Ok(parsed)
}

/// Run the full pipeline and return the rendered output.
pub fn convert<S: AsRef<str>>(
    lines: &[S],
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    let table = ObjectTable::build(lines);
    let parsed = parse_rules(lines, &table, options.on_malformed)?;

    let renderer = renderer_for(options.format, &options.device_group);
    let output = renderer.render(&parsed.rules, &table, &options.render)?;

    Ok(Conversion {
        output,
        summary: summarize(&table, &parsed),
        skipped: parsed.skipped,
    })
}
