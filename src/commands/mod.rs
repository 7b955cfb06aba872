pub mod chunk;
pub mod filter;
pub mod metadata;
pub mod prepare;
pub mod sections;
