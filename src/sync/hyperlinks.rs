//! Page-destination hyperlink annotations over the rendered TOC.
//!
//! The annotations are rebuilt from scratch on every run: everything on
//! the contents page's hyperlink layer is deleted first, then one link
//! frame is created per rendered TOC line, laid out in two balanced
//! columns mirroring the two-column TOC block.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{SyncConfig, TocTarget};
use crate::error::{Error, Result};
use crate::sync::host::{DocumentHost, FrameQuery, NewFrame};

/// Non-empty text, a tab, one or more digits, end of line.
static TOC_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+\t(\d+)$").unwrap());

/// Delete all frames on the contents page's hyperlink layer. Must run
/// before creation; this is the idempotence boundary.
pub fn delete_hyperlinks<H: DocumentHost>(host: &mut H, config: &SyncConfig) -> Result<()> {
    host.goto_page(config.contents_page);
    let links = host.frames(&FrameQuery {
        kind: None,
        layer: Some(&config.hyperlink_layer),
        page: Some(config.contents_page),
    });
    log::debug!("deleting {} hyperlink frames", links.len());
    for link in links {
        host.delete_frame(&link)?;
    }
    Ok(())
}

/// Create the link annotations for one TOC target by re-parsing the text
/// of its just-rendered frame. Returns the created frame names in order.
///
/// Lines that don't match the "text, tab, page number" pattern are
/// skipped with a diagnostic. The column break falls at `ceil(n/2)`; zero
/// lines create zero frames.
pub fn create_hyperlinks<H: DocumentHost>(
    host: &mut H,
    config: &SyncConfig,
    target: &TocTarget,
) -> Result<Vec<String>> {
    let text = host.frame_text(&target.frame)?;
    let (frame_x, frame_y) = host.position(&target.frame)?;

    let mut pages = Vec::new();
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        match TOC_LINE.captures(line).and_then(|c| c[1].parse::<u32>().ok()) {
            Some(page) => pages.push(page),
            None => {
                let err = Error::MalformedTocLine(line.to_string());
                host.report(&format!("skipping TOC line in {:?}: {err}", target.frame));
            }
        }
    }

    let geometry = &config.hyperlinks;
    let width = config.hyperlink_width();
    let half = pages.len().div_ceil(2);

    host.goto_page(config.contents_page);
    let mut links = Vec::with_capacity(pages.len());
    let mut x = frame_x;
    let mut y = frame_y + geometry.y_offset;

    for (i, page) in pages.iter().enumerate() {
        if i == half {
            // Second column: reset to the top.
            x = geometry.column2_x;
            y = frame_y + geometry.y_offset;
        }
        let name = format!("{}{}", target.link_prefix, i + 1);
        let created = host.create_text_frame(&NewFrame {
            page: config.contents_page,
            layer: &config.hyperlink_layer,
            x,
            y,
            width,
            height: geometry.frame_height,
            name: Some(&name),
        })?;
        // Destination pages are 0-based in the host.
        host.set_link_annotation(&created, page.saturating_sub(1))?;
        links.push(created);
        y += geometry.frame_height + geometry.gap;
    }

    log::debug!(
        "created {} link frames for {:?} ({} in column 1)",
        links.len(),
        target.frame,
        half
    );
    Ok(links)
}

/// Full hyperlink pass: delete, then recreate for both targets.
///
/// The last background link is renamed to its stable epilogue identity so
/// the epilogue-page renumbering step can retarget it later without
/// knowing its position. The rules links are grouped under a stable name.
pub fn rebuild_hyperlinks<H: DocumentHost>(host: &mut H, config: &SyncConfig) -> Result<()> {
    delete_hyperlinks(host, config)?;

    let mut background = create_hyperlinks(host, config, &config.background)?;
    if let Some(last) = background.last_mut() {
        host.rename_frame(last, &config.epilogue_link_name)?;
        *last = config.epilogue_link_name.clone();
    }

    let rules = create_hyperlinks(host, config, &config.rules)?;
    if !rules.is_empty() {
        host.group_frames(&rules, &config.rules_group_name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::host::FrameKind;
    use crate::sync::memory::MemoryHost;

    fn seeded_host(toc_text: &str) -> MemoryHost {
        let mut host = MemoryHost::new(40);
        host.seed(
            "TOC_Background",
            FrameKind::Text,
            &NewFrame {
                page: 7,
                layer: "Background",
                x: 20.0,
                y: 30.0,
                width: 81.0,
                height: 200.0,
                name: Some("TOC_Background"),
            },
        );
        host.set_frame_text("TOC_Background", toc_text).unwrap();
        host
    }

    #[test]
    fn column_break_falls_at_half_rounded_up() {
        let config = SyncConfig::default();
        let mut host = seeded_host("A\t9\nB\t10\nC\t11\nD\t12\nE\t13\n");
        let links = create_hyperlinks(&mut host, &config, &config.background).unwrap();
        assert_eq!(links.len(), 5);

        // ceil(5/2) = 3 frames in column 1, the remainder in column 2.
        let col1: Vec<_> = links
            .iter()
            .filter(|l| host.frame(l).unwrap().x == 20.0)
            .collect();
        let col2: Vec<_> = links
            .iter()
            .filter(|l| host.frame(l).unwrap().x == config.hyperlinks.column2_x)
            .collect();
        assert_eq!(col1.len(), 3);
        assert_eq!(col2.len(), 2);

        // Both columns start at the same offset from the TOC frame.
        assert_eq!(host.frame("bh1").unwrap().y, host.frame("bh4").unwrap().y);
    }

    #[test]
    fn destinations_are_zero_based() {
        let config = SyncConfig::default();
        let mut host = seeded_host("Overview\t9\n");
        create_hyperlinks(&mut host, &config, &config.background).unwrap();
        assert_eq!(host.frame("bh1").unwrap().link, Some(8));
    }

    #[test]
    fn empty_toc_creates_no_frames_and_no_error() {
        let config = SyncConfig::default();
        let mut host = seeded_host("");
        let links = create_hyperlinks(&mut host, &config, &config.background).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped_with_a_diagnostic() {
        let config = SyncConfig::default();
        let mut host = seeded_host("Overview\t9\nno page number here\nRules\t12\n");
        let links = create_hyperlinks(&mut host, &config, &config.background).unwrap();
        assert_eq!(links.len(), 2);
        assert!(host.reports.iter().any(|r| r.contains("no page number here")));
    }

    #[test]
    fn missing_toc_frame_is_a_missing_anchor() {
        let config = SyncConfig::default();
        let mut host = MemoryHost::new(40);
        let err = create_hyperlinks(&mut host, &config, &config.rules).unwrap_err();
        assert!(matches!(err, Error::MissingAnchor(name) if name == "TOC_Rules"));
    }
}
