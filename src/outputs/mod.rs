//! Artifact writers for the published outputs.
//!
//! One completed run persists three files into the output directory:
//!
//! ```text
//! output_dir/
//! ├── feed.json           # full capped snapshot
//! ├── diff.json           # items unseen in the previous snapshot
//! └── scrape_summary.txt  # key=value lines for line-oriented tooling
//! ```
//!
//! The JSON schemas and the summary line format are the contract consumed
//! by downstream readers; see [`json`] and [`summary`].

pub mod json;
pub mod summary;
