//! The document-mutation interface the synchronizer drives.
//!
//! The host application owns the canvas; the synchronizer only ever talks
//! to it through this trait. [`crate::sync::MemoryHost`] implements it for
//! dry-runs and tests.

use crate::error::Result;

/// Kinds of canvas objects, as far as synchronization cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Text,
    Image,
    Other,
}

/// Filter for frame enumeration. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameQuery<'a> {
    pub kind: Option<FrameKind>,
    pub layer: Option<&'a str>,
    /// 1-based page number.
    pub page: Option<u32>,
}

/// Parameters for creating a text frame.
#[derive(Debug, Clone, Copy)]
pub struct NewFrame<'a> {
    /// 1-based page the frame is placed on.
    pub page: u32,
    pub layer: &'a str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Object name; the host generates one when absent.
    pub name: Option<&'a str>,
}

/// Operations the host document environment must provide.
///
/// Frames are addressed by their object names. Styling operations fail
/// with [`crate::Error::MissingStyle`] when the named style does not exist
/// in the document; frame operations fail with
/// [`crate::Error::MissingAnchor`] when the named frame does not exist.
pub trait DocumentHost {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Master-page template name assigned to a page, if known.
    fn master_page(&self, page: u32) -> Option<String>;

    /// Navigate to a page. Object creation happens on the current page in
    /// some hosts; the synchronizer always navigates before creating.
    fn goto_page(&mut self, page: u32);

    /// Names of the frames matching a query, in a stable order.
    fn frames(&self, query: &FrameQuery<'_>) -> Vec<String>;

    fn frame_text(&self, frame: &str) -> Result<String>;

    fn set_frame_text(&mut self, frame: &str, text: &str) -> Result<()>;

    /// The paragraph style currently applied to a whole frame, if any.
    fn paragraph_style(&self, frame: &str) -> Result<Option<String>>;

    /// Apply a paragraph style to a whole frame.
    fn set_paragraph_style(&mut self, frame: &str, style: &str) -> Result<()>;

    /// Apply a paragraph style to a character range of a frame's text.
    /// Offsets count characters, not bytes.
    fn set_paragraph_style_range(
        &mut self,
        frame: &str,
        start: usize,
        len: usize,
        style: &str,
    ) -> Result<()>;

    /// Apply a character style to a character range of a frame's text.
    fn set_character_style_range(
        &mut self,
        frame: &str,
        start: usize,
        len: usize,
        style: &str,
    ) -> Result<()>;

    /// A frame's `(x, y)` position.
    fn position(&self, frame: &str) -> Result<(f64, f64)>;

    /// A frame's `(width, height)`.
    fn size(&self, frame: &str) -> Result<(f64, f64)>;

    fn set_position(&mut self, frame: &str, x: f64, y: f64) -> Result<()>;

    fn set_size(&mut self, frame: &str, width: f64, height: f64) -> Result<()>;

    /// Create a text frame; returns the frame's object name.
    fn create_text_frame(&mut self, frame: &NewFrame<'_>) -> Result<String>;

    fn delete_frame(&mut self, frame: &str) -> Result<()>;

    /// Give a frame a new stable object name.
    fn rename_frame(&mut self, frame: &str, new_name: &str) -> Result<()>;

    /// Group frames under a named group object.
    fn group_frames(&mut self, frames: &[String], name: &str) -> Result<()>;

    /// Attach a page-destination link annotation to a frame.
    /// `destination_page` is 0-based.
    fn set_link_annotation(&mut self, frame: &str, destination_page: u32) -> Result<()>;

    /// Surface a non-fatal diagnostic to the operator.
    fn report(&mut self, message: &str) {
        log::warn!("{message}");
    }
}
