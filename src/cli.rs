use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "permitprep",
    version,
    about = "Permit document preparation: section splitting, boilerplate filtering, chunking, metadata"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Sections(SectionsArgs),
    Filter(FilterArgs),
    Chunk(ChunkArgs),
    Metadata(MetadataArgs),
    Prepare(PrepareArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    EnvironmentalPermit,
    DischargeConsent,
    AbstractionLicence,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnvironmentalPermit => "environmental-permit",
            Self::DischargeConsent => "discharge-consent",
            Self::AbstractionLicence => "abstraction-licence",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SectionsArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub document_type: Option<DocumentType>,
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub document_type: Option<DocumentType>,

    #[arg(long, default_value_t = false)]
    pub preserve_headers: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ChunkArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub document_type: Option<DocumentType>,

    #[arg(long, default_value_t = false)]
    pub preserve_headers: bool,

    #[arg(long, default_value_t = 4000)]
    pub target_chunk_size: usize,

    #[arg(long, default_value_t = false)]
    pub preserve_context: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MetadataArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = crate::pipeline::DEFAULT_METADATA_WINDOW)]
    pub metadata_window: usize,
}

#[derive(Args, Debug, Clone)]
pub struct PrepareArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub document_type: Option<DocumentType>,

    #[arg(long, default_value_t = false)]
    pub preserve_headers: bool,

    #[arg(long, default_value_t = 4000)]
    pub target_chunk_size: usize,

    #[arg(long, default_value_t = false)]
    pub preserve_context: bool,

    #[arg(long, default_value_t = crate::pipeline::DEFAULT_METADATA_WINDOW)]
    pub metadata_window: usize,
}
