use anyhow::Result;
use tracing::info;

use crate::cli::SectionsArgs;
use crate::model::SectionListing;
use crate::pipeline::SectionSplitter;
use crate::util::{emit_json, read_text_file};

pub fn run(args: SectionsArgs) -> Result<()> {
    let text = read_text_file(&args.input)?;
    let splitter = SectionSplitter::new(args.document_type)?;
    let sections = splitter.split(&text);

    info!(
        input = %args.input.display(),
        section_count = sections.len(),
        "split document into sections"
    );

    let listing = SectionListing {
        section_count: sections.len(),
        sections,
    };
    emit_json(args.output.as_deref(), &listing)
}
