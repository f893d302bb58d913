//! Heading extraction: scanning story trees for styled heading runs and
//! turning them into an ordered, leveled entry sequence.

mod levels;
mod scanner;

pub use levels::{HeadingEntry, StylePriorityList, order_and_level};
pub use scanner::{HeadingCandidate, ScanOptions, ScanReport, scan_document, scan_frame};

use crate::error::Result;
use crate::story::Document;

/// Extract the ordered, leveled heading entries for one style priority
/// list: scan every frame past the front-matter boundary, then sort and
/// level the candidates.
pub fn extract_entries(
    doc: &Document,
    priority: &StylePriorityList,
    options: &ScanOptions,
) -> Result<Vec<HeadingEntry>> {
    let report = scan_document(doc, priority.styles(), options)?;
    for (frame, err) in &report.failures {
        log::warn!("skipped {frame}: {err}");
    }
    Ok(order_and_level(report.candidates, priority))
}
