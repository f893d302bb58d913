//! Error types for slatoc operations.

use thiserror::Error;

/// Errors that can occur while loading a document or synchronizing
/// derived content.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A cross-reference named a label that is absent from the document's
    /// label table. Fatal to the scan of the frame that raised it.
    #[error("unresolved label: {0:?} is not defined in the label table")]
    UnresolvedLabel(String),

    /// A configured paragraph or character style does not exist in the
    /// document. Non-fatal: the element keeps its default styling.
    #[error("missing style: {0:?} does not exist in the document")]
    MissingStyle(String),

    /// A required named object (a TOC frame, a link group) was not found.
    /// Fatal to the sub-operation that needed it, not to the whole pass.
    #[error("missing anchor: no object named {0:?} in the document")]
    MissingAnchor(String),

    /// A rendered TOC line did not match the "text, tab, page number"
    /// pattern during hyperlink regeneration. The line is skipped.
    #[error("malformed TOC line: {0:?}")]
    MalformedTocLine(String),
}

pub type Result<T> = std::result::Result<T, Error>;
