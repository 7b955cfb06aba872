use anyhow::Result;
use tracing::info;

use crate::cli::FilterArgs;
use crate::pipeline::{FilterOptions, RelevanceFilter, SectionSplitter};
use crate::util::{emit_json, read_text_file};

pub fn run(args: FilterArgs) -> Result<()> {
    let text = read_text_file(&args.input)?;

    let splitter = SectionSplitter::new(args.document_type)?;
    let filter = RelevanceFilter::new()?;
    let options = FilterOptions {
        preserve_headers: args.preserve_headers,
        document_type: args.document_type,
    };

    let sections = splitter.split(&text);
    let result = filter.filter(&sections, &options);

    info!(
        input = %args.input.display(),
        original_length = result.original_length,
        filtered_length = result.filtered_length,
        reduction_percentage = format!("{:.1}", result.reduction_percentage),
        removed_sections = result.removed_sections.len(),
        "filtered document"
    );

    emit_json(args.output.as_deref(), &result)
}
