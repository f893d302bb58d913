//! Placement of section-header frames over the rules pages.
//!
//! The titles themselves come from an external analysis of the rules
//! document and arrive as plain records; this pass only owns their
//! placement, with the usual delete-then-recreate cycle on the notes
//! layer.

use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::sync::host::{DocumentHost, FrameKind, FrameQuery, NewFrame};

/// A section title with its position inside the rules document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct RulesTitle {
    pub title: String,
    /// 1-based page inside the rules document.
    pub page: u32,
    /// Vertical position measured from the bottom edge.
    pub y_pos: f64,
}

/// Delete every text frame on the notes layer across the rules pages.
pub fn remove_rules_headers<H: DocumentHost>(
    host: &mut H,
    config: &SyncConfig,
    rules_start: u32,
    rules_end: u32,
) -> Result<()> {
    for page in rules_start..=rules_end {
        let frames = host.frames(&FrameQuery {
            kind: Some(FrameKind::Text),
            layer: Some(&config.notes_layer),
            page: Some(page),
        });
        for frame in frames {
            host.delete_frame(&frame)?;
        }
    }
    Ok(())
}

/// Create one styled header frame per title.
///
/// Title pages are relative to the rules document, so a title on its page
/// 1 lands on `rules_start`; the vertical position flips from
/// bottom-measured to top-measured using the configured page height.
pub fn place_rules_headers<H: DocumentHost>(
    host: &mut H,
    config: &SyncConfig,
    rules_start: u32,
    titles: &[RulesTitle],
) -> Result<()> {
    let geometry = &config.rules_headers;
    for title in titles {
        let page = rules_start + title.page - 1;
        host.goto_page(page);
        let frame = host.create_text_frame(&NewFrame {
            page,
            layer: &config.notes_layer,
            x: geometry.x,
            y: geometry.page_height - title.y_pos,
            width: geometry.width,
            height: geometry.height,
            name: None,
        })?;
        host.set_frame_text(&frame, &title.title)?;
        if let Err(err) = host.set_paragraph_style(&frame, &geometry.style) {
            match err {
                Error::MissingStyle(style) => {
                    host.report(&format!(
                        "couldn't find rules header style {style:?} for {:?}",
                        title.title
                    ));
                }
                other => return Err(other),
            }
        }
    }
    Ok(())
}

/// Full rules-header pass: clear the notes layer over the rules range,
/// then place the supplied titles.
pub fn rebuild_rules_headers<H: DocumentHost>(
    host: &mut H,
    config: &SyncConfig,
    rules_start: u32,
    rules_end: u32,
    titles: &[RulesTitle],
) -> Result<()> {
    remove_rules_headers(host, config, rules_start, rules_end)?;
    place_rules_headers(host, config, rules_start, titles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::memory::MemoryHost;

    fn title(title: &str, page: u32, y_pos: f64) -> RulesTitle {
        RulesTitle {
            title: title.to_string(),
            page,
            y_pos,
        }
    }

    #[test]
    fn titles_land_on_offset_pages_with_flipped_y() {
        let config = SyncConfig::default();
        let mut host = MemoryHost::new(60);
        host.define_style("HEADER Rules");
        place_rules_headers(
            &mut host,
            &config,
            40,
            &[title("Magic", 1, 700.0), title("Armoury", 3, 500.0)],
        )
        .unwrap();

        let on_page = |page| {
            host.frames(&FrameQuery {
                kind: Some(FrameKind::Text),
                layer: Some("Notes"),
                page: Some(page),
            })
        };
        let magic = on_page(40);
        assert_eq!(magic.len(), 1);
        let frame = host.frame(&magic[0]).unwrap();
        assert_eq!(frame.text, "Magic");
        assert!((frame.y - (841.89 - 700.0)).abs() < 1e-9);
        assert_eq!(on_page(42).len(), 1);
    }

    #[test]
    fn rebuild_replaces_earlier_placements() {
        let config = SyncConfig::default();
        let mut host = MemoryHost::new(60);
        host.define_style("HEADER Rules");
        let titles = [title("Magic", 1, 700.0)];
        rebuild_rules_headers(&mut host, &config, 40, 55, &titles).unwrap();
        rebuild_rules_headers(&mut host, &config, 40, 55, &titles).unwrap();
        assert_eq!(host.frame_count(), 1);
    }
}
