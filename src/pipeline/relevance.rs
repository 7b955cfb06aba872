use anyhow::{Context, Result};
use regex::Regex;

use crate::cli::DocumentType;
use crate::model::{FilterResult, Section};
use crate::pipeline::patterns::{RuleCategory, RuleScope, SectionRule, classification_rules};

#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub preserve_headers: bool,
    pub document_type: Option<DocumentType>,
}

/// Removes boilerplate sections and per-line noise from a split document.
/// Classification walks the precedence-ordered rule table; anything the
/// table does not claim is retained.
#[derive(Debug)]
pub struct RelevanceFilter {
    rules: Vec<SectionRule>,
    page_number_line: Regex,
    copyright_line: Regex,
}

impl RelevanceFilter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: classification_rules()?,
            page_number_line: Regex::new(r"(?i)^\s*Page\s+\d+\s+of\s+\d+\s*$")
                .context("failed to compile page-number regex")?,
            copyright_line: Regex::new(r"©.*\d{4}")
                .context("failed to compile copyright regex")?,
        })
    }

    pub fn filter(&self, sections: &[Section], options: &FilterOptions) -> FilterResult {
        let original_length = sections.last().map(|s| s.end_offset).unwrap_or(0);

        let mut pieces = Vec::new();
        let mut removed_sections = Vec::new();

        for section in sections {
            if self.classify(section, options.document_type) == Some(RuleCategory::Boilerplate) {
                removed_sections.push(section.header.clone().unwrap_or_default());
                continue;
            }

            let body = self.clean_body(&section.body);
            let emit_header = section.header.as_deref().is_some_and(|header| {
                options.preserve_headers || self.is_substantive_line(header, options.document_type)
            });

            let piece = match (emit_header, body.is_empty()) {
                (true, true) => section.header.clone().unwrap_or_default(),
                (true, false) => format!("{}\n{}", section.header.as_deref().unwrap_or(""), body),
                (false, true) => continue,
                (false, false) => body,
            };
            pieces.push(piece);
        }

        // A blank-line join can only outgrow the input when every piece is
        // a bare header line; fall back to single newlines to keep
        // filtered_length <= original_length.
        let mut filtered_text = pieces.join("\n\n");
        if filtered_text.chars().count() > original_length {
            filtered_text = pieces.join("\n");
        }

        let filtered_length = filtered_text.chars().count();
        let reduction_percentage = if original_length == 0 {
            0.0
        } else {
            let reduced = original_length.saturating_sub(filtered_length);
            (reduced as f64 / original_length as f64 * 100.0).clamp(0.0, 100.0)
        };

        FilterResult {
            filtered_text,
            original_length,
            filtered_length,
            reduction_percentage,
            removed_sections,
        }
    }

    /// Highest-precedence matching rule wins; `None` means no rule claimed
    /// the section, which defaults to retained.
    fn classify(
        &self,
        section: &Section,
        document_type: Option<DocumentType>,
    ) -> Option<RuleCategory> {
        for rule in self.applicable_rules(document_type) {
            let matched = match rule.scope {
                RuleScope::HeaderOnly => section
                    .header
                    .as_deref()
                    .is_some_and(|header| rule.pattern.is_match(header)),
                RuleScope::Anywhere => {
                    section
                        .header
                        .as_deref()
                        .is_some_and(|header| rule.pattern.is_match(header))
                        || rule.pattern.is_match(&section.body)
                }
            };

            if matched {
                return Some(rule.category);
            }
        }

        None
    }

    /// True when the line itself carries an obligation marker. Such lines
    /// are emitted even with `preserve_headers` off: the splitter treats
    /// "CONDITION 1: ..." as a header, and dropping it would drop the
    /// obligation.
    fn is_substantive_line(&self, line: &str, document_type: Option<DocumentType>) -> bool {
        self.applicable_rules(document_type)
            .filter(|rule| rule.category == RuleCategory::Substantive)
            .any(|rule| rule.pattern.is_match(line))
    }

    fn applicable_rules(
        &self,
        document_type: Option<DocumentType>,
    ) -> impl Iterator<Item = &SectionRule> {
        self.rules
            .iter()
            .filter(move |rule| rule.document_type.is_none() || rule.document_type == document_type)
    }

    /// Strips page-number and copyright lines, then trims the edges; the
    /// interior blank-line structure is left alone for the chunker.
    fn clean_body(&self, body: &str) -> String {
        let kept = body
            .lines()
            .filter(|line| {
                !self.page_number_line.is_match(line) && !self.copyright_line.is_match(line)
            })
            .collect::<Vec<&str>>();

        kept.join("\n").trim().to_string()
    }
}
