use serde::Serialize;

use crate::convert::{Conversion, ParsedRules, SkippedLine};
use crate::objects::ObjectTable;

/// Counts describing one conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub objects: usize,
    pub groups: usize,
    /// Address entries generated from group members.
    pub group_members: usize,
    pub rules: usize,
    pub skipped: usize,
}

/// Machine-readable report: the counts plus every skipped access-list line.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport<'a> {
    #[serde(flatten)]
    pub summary: ConversionSummary,
    pub skipped_lines: &'a [SkippedLine],
}

impl<'a> SummaryReport<'a> {
    pub fn new(conversion: &'a Conversion) -> Self {
        Self {
            summary: conversion.summary,
            skipped_lines: &conversion.skipped,
        }
    }
}

pub fn summarize(table: &ObjectTable, parsed: &ParsedRules) -> ConversionSummary {
    ConversionSummary {
        objects: table.objects().len(),
        groups: table.groups().len(),
        group_members: table.groups().iter().map(|g| g.members.len()).sum(),
        rules: parsed.rules.len(),
        skipped: parsed.skipped.len(),
    }
}

pub fn render(summary: ConversionSummary) -> String {
    format!(
        "convert_summary objects={} groups={} group_members={} rules={} skipped={}",
        summary.objects, summary.groups, summary.group_members, summary.rules, summary.skipped
    )
}
