mod chunker;
mod metadata;
mod patterns;
mod relevance;
mod splitter;
#[cfg(test)]
mod tests;

pub use chunker::{ChunkOptions, chunk};
pub use metadata::{DEFAULT_METADATA_WINDOW, MetadataExtractor, MetadataOptions};
pub use relevance::{FilterOptions, RelevanceFilter};
pub use splitter::SectionSplitter;
