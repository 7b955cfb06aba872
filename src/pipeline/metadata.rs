use anyhow::{Context, Result};
use regex::Regex;

use crate::model::DocumentMetadata;

/// Permit metadata sits in the document header; scanning past it costs
/// precision more than it gains recall. Inherited default, overridable
/// per call.
pub const DEFAULT_METADATA_WINDOW: usize = 3000;

#[derive(Debug, Clone)]
pub struct MetadataOptions {
    pub window_chars: usize,
}

impl Default for MetadataOptions {
    fn default() -> Self {
        Self {
            window_chars: DEFAULT_METADATA_WINDOW,
        }
    }
}

/// Pulls structured fields from the head of a permit document with
/// ordered per-field pattern lists; the first pattern that matches wins
/// and a field with no match is simply absent.
#[derive(Debug)]
pub struct MetadataExtractor {
    permit_reference: Vec<Regex>,
    regulator: Vec<(Regex, &'static str)>,
    date_issued: Vec<Regex>,
    water_company: Regex,
}

impl MetadataExtractor {
    pub fn new() -> Result<Self> {
        let permit_reference = compile_all(&[
            // Keyword matching is case-insensitive; the reference itself
            // must be uppercase/digits so prose after the keyword is not
            // mistaken for a reference.
            r"(?i:permit\s+(?:number|no\.?|reference))\s*[:\-]?\s*([A-Z0-9][A-Z0-9/\-]*)",
            r"(?i:consent\s+(?:number|no\.?|reference))\s*[:\-]?\s*([A-Z0-9][A-Z0-9/\-]*)",
            r"\b(EPR/[A-Z0-9]+(?:/[A-Z0-9]+)?)\b",
            r"\b(EAWML\s*\d+)\b",
        ])
        .context("failed to compile permit reference patterns")?;

        let regulator = vec![
            (
                Regex::new(r"(?i)\bEnvironment Agency\b")
                    .context("failed to compile regulator pattern")?,
                "Environment Agency",
            ),
            (
                Regex::new(r"(?i)\bScottish Environment Protection Agency\b|\bSEPA\b")
                    .context("failed to compile regulator pattern")?,
                "Scottish Environment Protection Agency",
            ),
            (
                Regex::new(r"(?i)\bNatural Resources Wales\b|\bNRW\b")
                    .context("failed to compile regulator pattern")?,
                "Natural Resources Wales",
            ),
            (
                Regex::new(r"(?i)\bNorthern Ireland Environment Agency\b|\bNIEA\b")
                    .context("failed to compile regulator pattern")?,
                "Northern Ireland Environment Agency",
            ),
            // Bare abbreviation last: "EA" is too short to trust while a
            // fuller name might still match.
            (
                Regex::new(r"\bEA\b").context("failed to compile regulator pattern")?,
                "Environment Agency",
            ),
        ];

        let date_issued = compile_all(&[
            r"(?i)date\s+of\s+issue\s*[:\-]?\s*(\d{1,2}(?:st|nd|rd|th)?\s+[A-Za-z]+\s+\d{4}|\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4})",
            r"(?i)issued?\s+(?:on\s+)?(\d{1,2}(?:st|nd|rd|th)?\s+[A-Za-z]+\s+\d{4})",
            r"(?i)effective\s+(?:date|from)\s*[:\-]?\s*(\d{1,2}(?:st|nd|rd|th)?\s+[A-Za-z]+\s+\d{4}|\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4})",
        ])
        .context("failed to compile date patterns")?;

        let water_company = Regex::new(
            r"(?i)\b(Thames Water|Severn Trent Water|United Utilities|Anglian Water|Yorkshire Water|Northumbrian Water|Southern Water|South West Water|Wessex Water|Welsh Water|D[wŵ]r Cymru)\b",
        )
        .context("failed to compile water company pattern")?;

        Ok(Self {
            permit_reference,
            regulator,
            date_issued,
            water_company,
        })
    }

    pub fn extract(&self, text: &str, options: &MetadataOptions) -> DocumentMetadata {
        let window = head_window(text, options.window_chars);

        DocumentMetadata {
            permit_reference: first_capture(&self.permit_reference, window),
            regulator: self
                .regulator
                .iter()
                .find(|(pattern, _)| pattern.is_match(window))
                .map(|(_, canonical)| (*canonical).to_string()),
            date_issued: first_capture(&self.date_issued, window),
            water_company: self
                .water_company
                .captures(window)
                .and_then(|captures| captures.get(1))
                .map(|found| found.as_str().to_string()),
        }
    }
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).with_context(|| format!("invalid pattern: {pattern}"))
        })
        .collect()
}

fn first_capture(patterns: &[Regex], window: &str) -> Option<String> {
    for pattern in patterns {
        if let Some(found) = pattern
            .captures(window)
            .and_then(|captures| captures.get(1))
        {
            let value = found.as_str().trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

fn head_window(text: &str, window_chars: usize) -> &str {
    match text.char_indices().nth(window_chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}
