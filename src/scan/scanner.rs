//! Walks a frame's story nodes under a style-scope accumulator and emits
//! raw heading candidates.

use crate::error::{Error, Result};
use crate::story::{Document, Frame, LabelTable, StoryNode};

/// A raw heading run captured during a frame scan, before ordering and
/// level assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    pub text: String,
    /// The style that was active while the text accumulated.
    pub style: String,
    /// 1-based printed page number of the owning frame.
    pub page: u32,
    pub y_pos: f64,
    /// Document-wide emission counter; the tie-breaker of the total order.
    pub source_order: u32,
}

/// Options for a document scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Frames on pages at or before this boundary never contribute
    /// headings (cover, contents page, other front matter).
    pub front_matter_boundary: u32,
    /// Record a failing frame as a diagnostic and keep scanning instead of
    /// aborting the document scan on its first error.
    pub resilient: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            front_matter_boundary: crate::config::DEFAULT_FRONT_MATTER_BOUNDARY,
            resilient: false,
        }
    }
}

/// Result of a document scan: the candidates, plus the frames that failed
/// when scanning resiliently.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub candidates: Vec<HeadingCandidate>,
    pub failures: Vec<(String, Error)>,
}

/// Scan every frame of the document in document order, threading one
/// running source-order counter through all of them.
///
/// By default the first frame error aborts the scan: an unresolved label
/// almost always means a content defect the operator must fix. With
/// [`ScanOptions::resilient`] set, the failing frame is recorded in the
/// report and the remaining frames still contribute.
pub fn scan_document(
    doc: &Document,
    style_set: &[String],
    options: &ScanOptions,
) -> Result<ScanReport> {
    let mut report = ScanReport::default();
    let mut counter = 0;

    for (index, frame) in doc.frames.iter().enumerate() {
        if frame.page <= options.front_matter_boundary {
            continue;
        }
        match scan_frame(frame, style_set, &doc.labels, &mut counter) {
            Ok(candidates) => report.candidates.extend(candidates),
            Err(err) if options.resilient => {
                report.failures.push((describe_frame(frame, index), err));
            }
            Err(err) => return Err(err),
        }
    }

    log::debug!(
        "scan found {} candidates ({} frames failed)",
        report.candidates.len(),
        report.failures.len()
    );
    Ok(report)
}

/// Scan one frame's story for heading runs in the given style set.
///
/// The style scope starts at the frame's default style; style markers and
/// paragraph breaks override it as the nodes are walked. Text accumulates
/// only while the active style is in the set, and each run is emitted when
/// a paragraph break (or a style transition, or the end of the story)
/// terminates it. Cross-references resolve through the label table; an
/// unresolved label aborts this frame's scan.
pub fn scan_frame(
    frame: &Frame,
    style_set: &[String],
    labels: &LabelTable,
    source_order: &mut u32,
) -> Result<Vec<HeadingCandidate>> {
    let mut candidates = Vec::new();
    let mut scope = StyleScope::new(frame.default_style.clone());

    for node in frame.nodes() {
        match node {
            StoryNode::StyleMarker(style) => {
                if !style.is_empty() {
                    scope.flush(frame, source_order, &mut candidates);
                    scope.active = Some(style.clone());
                }
            }
            StoryNode::ParagraphBreak(next_style) => {
                scope.flush(frame, source_order, &mut candidates);
                if let Some(style) = next_style {
                    scope.active = Some(style.clone());
                }
            }
            StoryNode::TextRun(text) => {
                if scope.tracking(style_set) {
                    scope.append(text);
                }
            }
            StoryNode::CrossRef(label) => {
                if scope.tracking(style_set) {
                    let resolved = labels.resolve(label)?;
                    scope.append(resolved);
                }
            }
            StoryNode::LineBreak => {
                // Run continuation across a soft break, not a boundary.
                if !scope.accumulated.is_empty() {
                    scope.accumulated.push(' ');
                }
            }
        }
    }
    // A story that ends mid-run still emits it, as if a trailing paragraph
    // break were present.
    scope.flush(frame, source_order, &mut candidates);

    Ok(candidates)
}

/// The transient "currently active style" state threaded through one frame
/// scan. Never outlives the scan.
struct StyleScope {
    active: Option<String>,
    accumulated: String,
    /// The style that was active when accumulation started.
    accumulated_style: Option<String>,
}

impl StyleScope {
    fn new(default_style: Option<String>) -> Self {
        Self {
            active: default_style,
            accumulated: String::new(),
            accumulated_style: None,
        }
    }

    fn tracking(&self, style_set: &[String]) -> bool {
        match &self.active {
            Some(style) => style_set.iter().any(|s| s == style),
            None => false,
        }
    }

    fn append(&mut self, text: &str) {
        if self.accumulated.is_empty() {
            self.accumulated_style = self.active.clone();
        }
        self.accumulated.push_str(text);
    }

    fn flush(&mut self, frame: &Frame, source_order: &mut u32, out: &mut Vec<HeadingCandidate>) {
        if self.accumulated.is_empty() {
            return;
        }
        let text = self.accumulated.trim();
        if let (false, Some(style)) = (text.is_empty(), self.accumulated_style.take()) {
            out.push(HeadingCandidate {
                text: text.to_string(),
                style,
                page: frame.page,
                y_pos: frame.y_pos,
                source_order: *source_order,
            });
            *source_order += 1;
        }
        self.accumulated.clear();
    }
}

fn describe_frame(frame: &Frame, index: usize) -> String {
    match &frame.name {
        Some(name) => format!("frame {name:?} (page {})", frame.page),
        None => format!("frame #{index} (page {})", frame.page),
    }
}
