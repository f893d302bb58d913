//! SLA document loading.
//!
//! Event-driven parse of the document XML into the [`Document`] model:
//! the label table from the mark records, text frames in document order
//! with their story nodes, defined paragraph styles, and per-page
//! master-page names.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::events::attributes::Attribute;

use crate::error::{Error, Result};
use crate::story::{Document, Frame, StoryNode};

/// Marks of this kind carry variable text; other kinds (anchors, footnotes)
/// do not participate in label resolution.
const VARIABLE_TEXT_MARK: &str = "3";

/// The object kind of a text frame.
const TEXT_FRAME_KIND: &str = "4";

/// Read an SLA file from disk into a [`Document`].
///
/// # Example
///
/// ```no_run
/// use slatoc::read_sla;
///
/// let doc = read_sla("book.sla")?;
/// println!("{} frames, {} labels", doc.frames.len(), doc.labels.len());
/// # Ok::<(), slatoc::Error>(())
/// ```
pub fn read_sla<P: AsRef<Path>>(path: P) -> Result<Document> {
    let bytes = std::fs::read(path)?;
    read_sla_from_str(&decode(&bytes))
}

/// Parse an SLA document from already-decoded XML text.
pub fn read_sla_from_str(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc = Document::new();
    // Layer number -> layer name; layer records precede the page objects.
    let mut layers: HashMap<String, String> = HashMap::new();
    let mut frame: Option<Frame> = None;
    let mut frame_layer: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"DOCUMENT" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"ANZPAGES" {
                            doc.page_count = parse_u32(&attr, "ANZPAGES")?;
                        }
                    }
                }
                b"PAGEOBJECT" => {
                    let (new_frame, layer) = parse_frame_start(&e)?;
                    match new_frame {
                        Some(f) => {
                            frame = Some(f);
                            frame_layer = layer;
                        }
                        // Not a text frame: skip the whole subtree.
                        None => {
                            reader.read_to_end(e.name())?;
                        }
                    }
                }
                name => {
                    if let Some(node) = flat_element(name, &e, &mut doc, frame.as_mut())? {
                        if let Some(f) = frame.as_mut() {
                            f.nodes.push(node);
                        }
                    }
                }
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"PAGEOBJECT" => {
                    let (new_frame, layer) = parse_frame_start(&e)?;
                    if let Some(mut f) = new_frame {
                        f.layer = layer.and_then(|n| layers.get(&n).cloned());
                        doc.frames.push(f);
                    }
                }
                b"LAYERS" => {
                    let mut number = None;
                    let mut name = None;
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"NUMMER" => number = Some(attr_string(&attr)?),
                            b"NAME" => name = Some(attr_string(&attr)?),
                            _ => {}
                        }
                    }
                    if let (Some(number), Some(name)) = (number, name) {
                        layers.insert(number, name);
                    }
                }
                name => {
                    if let Some(node) = flat_element(name, &e, &mut doc, frame.as_mut())? {
                        if let Some(f) = frame.as_mut() {
                            f.nodes.push(node);
                        }
                    }
                }
            },
            Ok(Event::End(e)) if e.name().as_ref() == b"PAGEOBJECT" => {
                if let Some(mut f) = frame.take() {
                    f.layer = frame_layer.take().and_then(|n| layers.get(&n).cloned());
                    doc.frames.push(f);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    log::debug!(
        "loaded document: {} frames, {} labels, {} styles",
        doc.frames.len(),
        doc.labels.len(),
        doc.styles.len()
    );
    Ok(doc)
}

/// Handle the flat (non-container) elements: style definitions, mark
/// records, page records, and the story children of an open text frame.
/// Returns a story node to append, if the element was one.
fn flat_element(
    name: &[u8],
    e: &quick_xml::events::BytesStart<'_>,
    doc: &mut Document,
    frame: Option<&mut Frame>,
) -> Result<Option<StoryNode>> {
    match name {
        b"STYLE" if frame.is_none() => {
            for attr in e.attributes().flatten() {
                if attr.key.as_ref() == b"NAME" {
                    doc.styles.push(attr_string(&attr)?);
                }
            }
        }
        b"Mark" => {
            let mut kind = None;
            let mut label = None;
            let mut text = None;
            for attr in e.attributes().flatten() {
                match attr.key.as_ref() {
                    b"type" => kind = Some(attr_string(&attr)?),
                    b"label" => label = Some(attr_string(&attr)?),
                    b"str" => text = Some(attr_string(&attr)?),
                    _ => {}
                }
            }
            if kind.as_deref() == Some(VARIABLE_TEXT_MARK)
                && let (Some(label), Some(text)) = (label, text)
            {
                doc.labels.insert(label, text);
            }
        }
        b"PAGE" => {
            let mut number = None;
            let mut master = None;
            for attr in e.attributes().flatten() {
                match attr.key.as_ref() {
                    b"NUM" => number = Some(parse_i64(&attr, "NUM")?),
                    b"MNAM" => master = Some(attr_string(&attr)?),
                    _ => {}
                }
            }
            if let (Some(number), Some(master)) = (number, master) {
                doc.master_pages.insert((number + 1).max(0) as u32, master);
            }
        }
        b"DefaultStyle" => {
            if let Some(f) = frame {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"PARENT" {
                        let style = attr_string(&attr)?;
                        if !style.is_empty() {
                            if f.default_style.is_none() {
                                f.default_style = Some(style.clone());
                            }
                            return Ok(Some(StoryNode::StyleMarker(style)));
                        }
                    }
                }
            }
        }
        b"ITEXT" => {
            if frame.is_some() {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"CH" {
                        return Ok(Some(StoryNode::TextRun(attr_string(&attr)?)));
                    }
                }
            }
        }
        b"MARK" => {
            if frame.is_some() {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"label" {
                        return Ok(Some(StoryNode::CrossRef(attr_string(&attr)?)));
                    }
                }
            }
        }
        b"breakline" => {
            if frame.is_some() {
                return Ok(Some(StoryNode::LineBreak));
            }
        }
        b"para" | b"trail" => {
            if frame.is_some() {
                let mut style = None;
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"PARENT" {
                        let value = attr_string(&attr)?;
                        if !value.is_empty() {
                            style = Some(value);
                        }
                    }
                }
                return Ok(Some(StoryNode::ParagraphBreak(style)));
            }
        }
        _ => {}
    }
    Ok(None)
}

/// Parse a PAGEOBJECT open tag. Returns the frame (for text frames only)
/// and the raw layer number it belongs to.
fn parse_frame_start(
    e: &quick_xml::events::BytesStart<'_>,
) -> Result<(Option<Frame>, Option<String>)> {
    let mut kind = None;
    let mut frame = Frame::default();
    let mut layer = None;

    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"PTYPE" => kind = Some(attr_string(&attr)?),
            b"ANNAME" => {
                let name = attr_string(&attr)?;
                if !name.is_empty() {
                    frame.name = Some(name);
                }
            }
            // 0-based in the file (-1 for objects off any page); printed
            // page numbers are 1-based.
            b"OwnPage" => frame.page = (parse_i64(&attr, "OwnPage")? + 1).max(0) as u32,
            b"YPOS" => frame.y_pos = parse_f64(&attr, "YPOS")?,
            b"LAYER" => layer = Some(attr_string(&attr)?),
            _ => {}
        }
    }

    if kind.as_deref() == Some(TEXT_FRAME_KIND) {
        Ok((Some(frame), layer))
    } else {
        Ok((None, layer))
    }
}

fn attr_string(attr: &Attribute<'_>) -> Result<String> {
    let raw = String::from_utf8(attr.value.to_vec())?;
    // Entity errors keep the raw text.
    Ok(match unescape(&raw) {
        Ok(text) => text.into_owned(),
        Err(_) => raw,
    })
}

fn parse_u32(attr: &Attribute<'_>, name: &str) -> Result<u32> {
    let value = attr_string(attr)?;
    value
        .parse()
        .map_err(|_| Error::InvalidDocument(format!("bad {name} value {value:?}")))
}

fn parse_i64(attr: &Attribute<'_>, name: &str) -> Result<i64> {
    let value = attr_string(attr)?;
    value
        .parse()
        .map_err(|_| Error::InvalidDocument(format!("bad {name} value {value:?}")))
}

fn parse_f64(attr: &Attribute<'_>, name: &str) -> Result<f64> {
    let value = attr_string(attr)?;
    value
        .parse()
        .map_err(|_| Error::InvalidDocument(format!("bad {name} value {value:?}")))
}

/// Decode document bytes to text.
///
/// Tries UTF-8 first, then the encoding declared in the XML prolog, then
/// falls back to Windows-1252.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return text;
    }

    if let Some(name) = declared_encoding(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (text, _, _) = encoding.decode(bytes);
        return text;
    }

    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text
}

/// Extract the encoding name from `<?xml ... encoding="..."?>`, checking
/// only the prolog.
fn declared_encoding(bytes: &[u8]) -> Option<&str> {
    let head = &bytes[..bytes.len().min(120)];
    let at = head
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let rest = &head[at + 9..];
    let quote = *rest.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let end = rest[1..].iter().position(|&b| b == quote)?;
    std::str::from_utf8(&rest[1..1 + end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_encoding_from_prolog() {
        let xml = br#"<?xml version="1.0" encoding="ISO-8859-1"?><DOCUMENT/>"#;
        assert_eq!(declared_encoding(xml), Some("ISO-8859-1"));
    }

    #[test]
    fn declared_encoding_absent() {
        assert_eq!(declared_encoding(b"<?xml version=\"1.0\"?>"), None);
    }

    #[test]
    fn decode_falls_back_to_windows_1252() {
        // 0xE9 is e-acute in CP1252 but malformed as UTF-8.
        let bytes = b"<DOCUMENT ANZPAGES=\"1\" X=\"caf\xe9\"/>";
        let text = decode(bytes);
        assert!(text.contains("caf\u{e9}"));
    }

    #[test]
    fn entity_references_are_unescaped() {
        let doc = read_sla_from_str(
            r#"<SCRIBUSUTF8NEW><DOCUMENT ANZPAGES="1">
                <PAGEOBJECT PTYPE="4" OwnPage="0" YPOS="10.0">
                  <StoryText>
                    <ITEXT CH="Sword &amp; Board"/>
                  </StoryText>
                </PAGEOBJECT>
            </DOCUMENT></SCRIBUSUTF8NEW>"#,
        )
        .unwrap();
        assert_eq!(
            doc.frames[0].nodes,
            vec![StoryNode::TextRun("Sword & Board".to_string())]
        );
    }
}
