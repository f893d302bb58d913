//! Running page footers carrying the most recent heading.
//!
//! Footers are positional, not named: the delete sweep recognizes them by
//! their rounded canvas position on the hyperlink layer, then the create
//! pass walks every content page and places a fresh frame with the
//! carry-forward heading text.

use crate::config::{FooterGeometry, SyncConfig};
use crate::error::{Error, Result};
use crate::scan::HeadingEntry;
use crate::sync::host::{DocumentHost, FrameKind, FrameQuery, NewFrame};

/// Delete existing footer frames at their known canvas positions.
pub fn delete_footers<H: DocumentHost>(host: &mut H, config: &SyncConfig) -> Result<()> {
    let footers = &config.footers;
    let mut deleted = 0;
    for page in footers.sweep_start_page..=host.page_count() {
        let frames = host.frames(&FrameQuery {
            kind: Some(FrameKind::Text),
            layer: Some(&config.hyperlink_layer),
            page: Some(page),
        });
        for frame in frames {
            let (x, y) = host.position(&frame)?;
            if footers.sweep_x.contains(&(x.round() as i64))
                && footers.sweep_y.contains(&(y.round() as i64))
            {
                host.delete_frame(&frame)?;
                deleted += 1;
            }
        }
    }
    log::debug!("deleted {deleted} footer frames");
    Ok(())
}

/// Create a footer on every content page.
///
/// `entries` must already be in the total `(page, position, order)` order;
/// each page's footer text is the text of the last entry at or before that
/// page (empty until the first heading). Pages whose master-page name
/// starts with the blank prefix are skipped, but their headings still
/// advance the carry-forward.
pub fn create_footers<H: DocumentHost>(
    host: &mut H,
    config: &SyncConfig,
    entries: &[HeadingEntry],
) -> Result<()> {
    let footers = &config.footers;
    let mut current = "";
    let mut next_entry = 0;

    for page in (config.front_matter_boundary + 1)..=host.page_count() {
        while next_entry < entries.len() && entries[next_entry].page <= page {
            current = &entries[next_entry].text;
            next_entry += 1;
        }

        if let Some(master) = host.master_page(page)
            && master.starts_with(&config.blank_master_prefix)
        {
            continue;
        }

        let (x, y, style) = match footers.geometry {
            FooterGeometry::Standard { x, y } => (x, y, &footers.style_left),
            FooterGeometry::Alternating { x_even, x_odd, y } => {
                if page % 2 == 0 {
                    // Even, left-hand page.
                    (x_even, y, &footers.style_left)
                } else {
                    (x_odd, y, &footers.style_right)
                }
            }
            FooterGeometry::Fixed { x, y } => (x, y, &footers.style_left),
        };

        host.goto_page(page);
        let frame = host.create_text_frame(&NewFrame {
            page,
            layer: &config.hyperlink_layer,
            x,
            y,
            width: footers.width,
            height: footers.height,
            name: None,
        })?;
        host.set_frame_text(&frame, current)?;
        if let Err(err) = host.set_paragraph_style(&frame, style) {
            match err {
                Error::MissingStyle(style) => {
                    host.report(&format!("couldn't find footer style {style:?}"));
                }
                other => return Err(other),
            }
        }
    }
    Ok(())
}

/// Full footer pass: positional delete sweep, then recreation.
pub fn rebuild_footers<H: DocumentHost>(
    host: &mut H,
    config: &SyncConfig,
    entries: &[HeadingEntry],
) -> Result<()> {
    delete_footers(host, config)?;
    create_footers(host, config, entries)
}
