//! # slatoc
//!
//! Table-of-contents extraction and derived-content synchronization for
//! SLA page-layout documents.
//!
//! ## Features
//!
//! - Load an SLA document into a read-only story model (frames, style
//!   markers, text runs, cross-reference marks, paragraph breaks)
//! - Resolve indirect cross-references through the document's label table
//! - Scan styled heading runs into a stable, deterministically ordered,
//!   leveled entry sequence
//! - Rebuild the rendered TOC block, the page-destination hyperlink
//!   annotations, and the running page footers idempotently through a
//!   narrow document-mutation trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use slatoc::{
//!     BookVariant, MemoryHost, ScanOptions, SyncConfig, Synchronizer, extract_entries, read_sla,
//! };
//!
//! let doc = read_sla("book.sla")?;
//! let config = SyncConfig::for_variant(BookVariant::Standard);
//! let options = ScanOptions::default();
//!
//! let background = extract_entries(&doc, &config.background.heading_styles, &options)?;
//! let rules = extract_entries(&doc, &config.rules.heading_styles, &options)?;
//!
//! // Dry-run against the in-memory host; a real host drives the
//! // application canvas through the same trait.
//! let mut host = MemoryHost::new(doc.page_count);
//! let report = Synchronizer::new(&config).synchronize(&mut host, &background, &rules);
//! assert!(report.is_ok());
//! # Ok::<(), slatoc::Error>(())
//! ```
//!
//! ## Extracting headings from a hand-built document
//!
//! ```
//! use slatoc::{Document, Frame, ScanOptions, StoryNode, StylePriorityList, extract_entries};
//!
//! let mut doc = Document::new();
//! doc.frames.push(Frame {
//!     page: 9,
//!     default_style: Some("HEADER Level 1".into()),
//!     nodes: vec![
//!         StoryNode::TextRun("Overview".into()),
//!         StoryNode::ParagraphBreak(None),
//!     ],
//!     ..Frame::default()
//! });
//!
//! let priority = StylePriorityList::new(["HEADER Level 1"]);
//! let entries = extract_entries(&doc, &priority, &ScanOptions::default()).unwrap();
//! assert_eq!(entries[0].text, "Overview");
//! assert_eq!(entries[0].level, 1);
//! ```

pub mod config;
pub mod error;
pub mod scan;
pub mod sla;
pub mod story;
pub mod sync;

pub use config::{BookVariant, SyncConfig, TocTarget};
pub use error::{Error, Result};
pub use scan::{HeadingCandidate, HeadingEntry, ScanOptions, StylePriorityList, extract_entries};
pub use sla::{read_sla, read_sla_from_str};
pub use story::{Document, Frame, LabelTable, StoryNode};
pub use sync::{DocumentHost, MemoryHost, Synchronizer};
