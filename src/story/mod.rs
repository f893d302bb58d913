//! In-memory model of a loaded page-layout document.
//!
//! A [`Document`] owns a [`LabelTable`] and an ordered list of [`Frame`]s,
//! each of which owns its sequence of [`StoryNode`]s. The model is pure
//! data: it is populated by the [`crate::sla`] loader and read-only from
//! the scanner's perspective.

use std::collections::HashMap;

mod labels;

pub use labels::LabelTable;

/// One node in a frame's story sequence.
///
/// The loosely-tagged children of the source format map onto this closed
/// set of variants; exhaustive matching over it is what the scanner's core
/// loop is built on.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryNode {
    /// Frame-wide default style, seen before any paragraph-level override.
    StyleMarker(String),
    /// A literal run of text.
    TextRun(String),
    /// An indirect reference resolved through the document's label table.
    CrossRef(String),
    /// Soft line break inside a paragraph. Joins runs, does not end them.
    LineBreak,
    /// Paragraph boundary, optionally switching to a new paragraph style.
    ParagraphBreak(Option<String>),
}

/// A positioned text container on a page, the unit a heading is
/// attributed to.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Stable object name, when the document assigns one.
    pub name: Option<String>,
    /// 1-based printed page number.
    pub page: u32,
    /// Vertical position on the page.
    pub y_pos: f64,
    /// Owning layer name, when the layer is known.
    pub layer: Option<String>,
    /// Default paragraph style applied to the frame's story.
    pub default_style: Option<String>,
    pub nodes: Vec<StoryNode>,
}

impl Frame {
    /// The frame's story content in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &StoryNode> {
        self.nodes.iter()
    }
}

/// A loaded page-layout document: label table, text frames in document
/// order, defined paragraph styles, and per-page master-page assignments.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub labels: LabelTable,
    pub frames: Vec<Frame>,
    /// Names of the paragraph styles defined by the document.
    pub styles: Vec<String>,
    /// Master-page name per 1-based page number.
    pub master_pages: HashMap<u32, String>,
    /// Number of pages the document declares.
    pub page_count: u32,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a frame by its assigned object name.
    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.name.as_deref() == Some(name))
    }

    /// Which of the expected frame names are absent from the document.
    pub fn missing_frames<'a>(&self, expected: &[&'a str]) -> Vec<&'a str> {
        expected
            .iter()
            .filter(|name| self.frame(name).is_none())
            .copied()
            .collect()
    }

    /// Which of the expected paragraph styles are absent from the document.
    pub fn missing_styles<'a>(&self, expected: &[&'a str]) -> Vec<&'a str> {
        expected
            .iter()
            .filter(|style| !self.styles.iter().any(|s| s == *style))
            .copied()
            .collect()
    }
}
