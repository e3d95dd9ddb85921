//! # noet-vault
//!
//! A Rust library for querying a personal note collection: markdown files with a frontmatter
//! header and `[[wiki-style]]` links between them.
//!
//! ## Overview
//!
//! noet-vault loads a directory of notes into an immutable in-memory [`Vault`]. Loading parses
//! each note's frontmatter, keeps its body, and builds an inverted word index over all bodies.
//! The loaded vault then answers:
//!
//! - **Lookup**: list slugs, fetch one note or a batch of notes
//! - **Search**: exact word lookup, or approximate matching against indexed words
//! - **Links**: the `[[slug]]` targets of a note, in order of appearance
//! - **Relevant notes**: a breadth-first walk of the link graph, bounded by hop count, returning
//!   each reachable note with its shortest distance and a truncated body
//!
//! ## Architecture
//!
//! - **[`codec`]**: frontmatter/body splitting ([`codec::Frontmatter`], [`codec::MetadataValue`])
//!   and link extraction
//! - **[`note`]**: the [`Note`] document type; slugs are file names without their extension
//! - **[`index`]**: tokenizer and [`index::TermIndex`]
//! - **[`fuzzy`]**: similarity ratio and close-match selection
//! - **[`vault`]**: the [`Vault`] repository and its queries
//! - **[`query`]**: result and parameter types
//! - **[`config`]**: [`config::VaultConfig`], read from TOML and the environment
//! - **`service`** (feature `service`): HTTP routes over a shared vault
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use noet_vault::Vault;
//!
//! fn main() -> Result<(), noet_vault::VaultError> {
//!     let vault = Vault::load("./notes")?;
//!
//!     for slug in vault.list_slugs() {
//!         println!("{slug}");
//!     }
//!
//!     let note = vault.get("index")?;
//!     println!("{:?} links to {:?}", note.frontmatter(), note.extract_links());
//!
//!     for relevant in vault.find_relevant_notes("index", 2, 100)? {
//!         println!("{} ({} hops): {}", relevant.slug, relevant.distance, relevant.content_summary);
//!     }
//!
//!     println!("{:?}", vault.search("rust"));
//!     println!("{:?}", vault.fuzzy_search("rsut"));
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Loading is all-or-nothing: a read failure or two files resolving to the same slug aborts
//! construction with [`VaultError`]. After that, the only query-time failure is
//! [`VaultError::NotFound`] for an unknown slug.
//!
//! ## Features
//!
//! - **default**: the library
//! - **service**: HTTP API (`axum`)
//! - **bin**: the `noet-vault` CLI

pub mod codec;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod note;
pub mod query;
#[cfg(feature = "service")]
pub mod service;
pub mod vault;

pub use error::*;
pub use note::Note;
pub use vault::Vault;
