use anyhow::Result;
use tracing::info;

use crate::cli::MetadataArgs;
use crate::pipeline::{MetadataExtractor, MetadataOptions};
use crate::util::{emit_json, read_text_file};

pub fn run(args: MetadataArgs) -> Result<()> {
    let text = read_text_file(&args.input)?;

    let extractor = MetadataExtractor::new()?;
    let options = MetadataOptions {
        window_chars: args.metadata_window,
    };
    let metadata = extractor.extract(&text, &options);

    info!(
        input = %args.input.display(),
        permit_reference = metadata.permit_reference.as_deref().unwrap_or("-"),
        regulator = metadata.regulator.as_deref().unwrap_or("-"),
        "extracted document metadata"
    );

    emit_json(args.output.as_deref(), &metadata)
}
