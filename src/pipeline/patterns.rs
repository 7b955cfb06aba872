use anyhow::{Context, Result};
use regex::Regex;

use crate::cli::DocumentType;

/// Uppercase lines need at least this many alphabetic words to count as
/// headers, so single-word shouting ("IMPORTANT") and numbered stubs
/// ("OUTLET 1") do not fragment a section.
pub const MIN_UPPERCASE_HEADER_WORDS: usize = 2;

/// Uppercase lines longer than this are assumed to be wrapped body text.
pub const MAX_HEADER_LINE_CHARS: usize = 80;

#[derive(Debug)]
pub struct HeaderPatterns {
    marker_heading: Regex,
    standalone_heading: Regex,
    type_heading: Option<Regex>,
}

impl HeaderPatterns {
    pub fn new(document_type: Option<DocumentType>) -> Result<Self> {
        let type_heading = match document_type {
            Some(document_type) => Some(
                Regex::new(type_marker_pattern(document_type))
                    .context("failed to compile document-type heading regex")?,
            ),
            None => None,
        };

        Ok(Self {
            marker_heading: Regex::new(
                r"(?i)^(?:CONDITION|APPENDIX|PARAMETER|REQUIREMENT|SCHEDULE)\s*(?:\d+|:)",
            )
            .context("failed to compile marker heading regex")?,
            standalone_heading: Regex::new(
                r"(?i)^(?:TABLE OF CONTENTS|CONTENTS|DEFINITIONS|GLOSSARY|INTERPRETATION)\s*:?\s*$",
            )
            .context("failed to compile standalone heading regex")?,
            type_heading,
        })
    }

    pub fn is_header_line(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return false;
        }

        if self.marker_heading.is_match(trimmed) || self.standalone_heading.is_match(trimmed) {
            return true;
        }

        if let Some(type_heading) = &self.type_heading {
            if type_heading.is_match(trimmed) {
                return true;
            }
        }

        is_uppercase_heading(trimmed)
    }
}

fn type_marker_pattern(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::EnvironmentalPermit => {
            r"(?i)^(?:EMISSION LIMITS?|OPERATING TECHNIQUES|IMPROVEMENT PROGRAMME)\b"
        }
        DocumentType::DischargeConsent => {
            r"(?i)^(?:OUTLET|EFFLUENT|SAMPLING POINT)\s*(?:\d+|:)"
        }
        DocumentType::AbstractionLicence => {
            r"(?i)^(?:POINT OF ABSTRACTION|MEANS OF ABSTRACTION|QUANTITY OF WATER)\b"
        }
    }
}

fn is_uppercase_heading(trimmed: &str) -> bool {
    if trimmed.chars().count() > MAX_HEADER_LINE_CHARS {
        return false;
    }
    let alphabetic_words = trimmed
        .split_whitespace()
        .filter(|word| word.chars().any(|character| character.is_alphabetic()))
        .count();
    if alphabetic_words < MIN_UPPERCASE_HEADER_WORDS {
        return false;
    }

    !trimmed.chars().any(|character| character.is_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    Substantive,
    Boilerplate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Matched against the section header line only.
    HeaderOnly,
    /// Matched against the header line and the section body.
    Anywhere,
}

/// One row of the section classification table. Rules are evaluated in
/// descending precedence; substantive rules sit strictly above
/// boilerplate rules so an obligation inside an appendix can never be
/// discarded no matter how the rows are ordered in source.
#[derive(Debug)]
pub struct SectionRule {
    pub pattern: Regex,
    pub category: RuleCategory,
    pub scope: RuleScope,
    pub precedence: u8,
    pub document_type: Option<DocumentType>,
}

pub const SUBSTANTIVE_PRECEDENCE: u8 = 10;
pub const BOILERPLATE_PRECEDENCE: u8 = 5;

pub fn classification_rules() -> Result<Vec<SectionRule>> {
    let table: &[(&str, RuleCategory, RuleScope, u8, Option<DocumentType>)] = &[
        (
            r"(?i)\bCONDITION\s*\d+",
            RuleCategory::Substantive,
            RuleScope::Anywhere,
            SUBSTANTIVE_PRECEDENCE,
            None,
        ),
        (
            r"(?i)\bREQUIREMENT\s*\d+",
            RuleCategory::Substantive,
            RuleScope::Anywhere,
            SUBSTANTIVE_PRECEDENCE,
            None,
        ),
        // Numbered obligation lines, e.g. "2.3.1 The operator shall ...".
        (
            r"(?m)^\s*\d+(?:\.\d+)+\s+\S",
            RuleCategory::Substantive,
            RuleScope::Anywhere,
            SUBSTANTIVE_PRECEDENCE,
            None,
        ),
        (
            r"(?i)\bOUTLET\s*\d+",
            RuleCategory::Substantive,
            RuleScope::Anywhere,
            SUBSTANTIVE_PRECEDENCE,
            Some(DocumentType::DischargeConsent),
        ),
        (
            r"(?i)\bEMISSION LIMIT",
            RuleCategory::Substantive,
            RuleScope::Anywhere,
            SUBSTANTIVE_PRECEDENCE,
            Some(DocumentType::EnvironmentalPermit),
        ),
        (
            r"(?i)\bABSTRACTION\b",
            RuleCategory::Substantive,
            RuleScope::Anywhere,
            SUBSTANTIVE_PRECEDENCE,
            Some(DocumentType::AbstractionLicence),
        ),
        (
            r"(?i)^(?:TABLE OF CONTENTS|CONTENTS)\b",
            RuleCategory::Boilerplate,
            RuleScope::HeaderOnly,
            BOILERPLATE_PRECEDENCE,
            None,
        ),
        (
            r"(?i)^DEFINITIONS\b",
            RuleCategory::Boilerplate,
            RuleScope::HeaderOnly,
            BOILERPLATE_PRECEDENCE,
            None,
        ),
        (
            r"(?i)^GLOSSARY\b",
            RuleCategory::Boilerplate,
            RuleScope::HeaderOnly,
            BOILERPLATE_PRECEDENCE,
            None,
        ),
        (
            r"(?i)^INTERPRETATION\b",
            RuleCategory::Boilerplate,
            RuleScope::HeaderOnly,
            BOILERPLATE_PRECEDENCE,
            None,
        ),
        (
            r"(?i)^APPENDIX\b",
            RuleCategory::Boilerplate,
            RuleScope::HeaderOnly,
            BOILERPLATE_PRECEDENCE,
            None,
        ),
    ];

    let mut rules = Vec::with_capacity(table.len());
    for (pattern, category, scope, precedence, document_type) in table {
        rules.push(SectionRule {
            pattern: Regex::new(pattern)
                .with_context(|| format!("failed to compile classification rule: {pattern}"))?,
            category: *category,
            scope: *scope,
            precedence: *precedence,
            document_type: *document_type,
        });
    }
    rules.sort_by(|a, b| b.precedence.cmp(&a.precedence));

    Ok(rules)
}
