//! Rendering the TOC block into its target frame.

use crate::config::TocTarget;
use crate::error::{Error, Result};
use crate::scan::HeadingEntry;
use crate::sync::host::DocumentHost;

/// Render the TOC block for one target: one `"text<TAB>page"` line per
/// entry, in entry order, replacing whatever the frame held before.
///
/// The whole block gets the base (level-1) paragraph style; every entry
/// deeper than level 1 then gets its level's style applied to its line,
/// addressed by the running character offset of the line start. A missing
/// style degrades to default styling with a diagnostic; a missing target
/// frame is fatal.
///
/// Returns the rendered text, which hyperlink regeneration re-parses.
pub fn rebuild_toc<H: DocumentHost>(
    host: &mut H,
    target: &TocTarget,
    entries: &[HeadingEntry],
) -> Result<String> {
    let mut text = String::new();
    // Character offset of each entry's line start, tracked as the lines
    // are concatenated.
    let mut offsets = Vec::with_capacity(entries.len());
    let mut offset = 0usize;

    for entry in entries {
        let line = format!("{}\t{}\n", entry.text, entry.page);
        offsets.push(offset);
        offset += line.chars().count();
        text.push_str(&line);
    }

    host.set_frame_text(&target.frame, &text)?;
    log::debug!(
        "rendered {} TOC lines into {:?}",
        entries.len(),
        target.frame
    );

    if let Some(base) = target.toc_styles.first() {
        apply_style(host, target, base, |host, style| {
            host.set_paragraph_style(&target.frame, style)
        })?;
    }

    for (entry, line_start) in entries.iter().zip(&offsets) {
        if entry.level <= 1 {
            continue;
        }
        match target.toc_styles.get(entry.level as usize - 1) {
            Some(style) => {
                apply_style(host, target, style, |host, style| {
                    // One character is enough to address the paragraph.
                    host.set_paragraph_style_range(&target.frame, *line_start, 1, style)
                })?;
            }
            None => {
                host.report(&format!(
                    "no TOC style configured for level {} in {:?}",
                    entry.level, target.frame
                ));
            }
        }
    }

    Ok(text)
}

/// Run a styling operation, downgrading a missing style to a diagnostic.
fn apply_style<H, F>(host: &mut H, target: &TocTarget, style: &str, op: F) -> Result<()>
where
    H: DocumentHost,
    F: FnOnce(&mut H, &str) -> Result<()>,
{
    match op(&mut *host, style) {
        Err(Error::MissingStyle(style)) => {
            host.report(&format!(
                "couldn't find style {style:?} for {:?}",
                target.frame
            ));
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;
    use crate::sync::host::{FrameKind, NewFrame};
    use crate::sync::memory::MemoryHost;

    fn entry(level: u32, text: &str, page: u32) -> HeadingEntry {
        HeadingEntry {
            level,
            text: text.to_string(),
            page,
        }
    }

    fn host_with_toc_frame(target_frame: &str) -> MemoryHost {
        let mut host = MemoryHost::new(24);
        host.define_style("TOC Level 1");
        host.define_style("TOC Level 2");
        host.seed(
            target_frame,
            FrameKind::Text,
            &NewFrame {
                page: 7,
                layer: "Background",
                x: 20.0,
                y: 30.0,
                width: 81.0,
                height: 200.0,
                name: Some(target_frame),
            },
        );
        host
    }

    #[test]
    fn renders_tab_separated_lines_in_entry_order() {
        let config = SyncConfig::default();
        let mut host = host_with_toc_frame("TOC_Background");
        let entries = [
            entry(1, "Overview", 9),
            entry(2, "History", 9),
            entry(1, "Rules", 12),
        ];
        let text = rebuild_toc(&mut host, &config.background, &entries).unwrap();
        assert_eq!(text, "Overview\t9\nHistory\t9\nRules\t12\n");
        assert_eq!(host.frame("TOC_Background").unwrap().text, text);
    }

    #[test]
    fn base_style_applies_to_block_and_level_styles_to_lines() {
        let config = SyncConfig::default();
        let mut host = host_with_toc_frame("TOC_Background");
        let entries = [
            entry(1, "Overview", 9),
            entry(2, "History", 9),
            entry(1, "Rules", 12),
        ];
        rebuild_toc(&mut host, &config.background, &entries).unwrap();

        let frame = host.frame("TOC_Background").unwrap();
        assert_eq!(frame.paragraph_style.as_deref(), Some("TOC Level 1"));
        // "Overview\t9\n" is 11 chars, so "History" starts at offset 11.
        assert_eq!(
            frame.range_styles,
            vec![(11, 1, "TOC Level 2".to_string())]
        );
    }

    #[test]
    fn missing_style_degrades_with_a_diagnostic() {
        let config = SyncConfig::default();
        // The level-2 style is left undefined.
        let mut host = MemoryHost::new(24);
        host.define_style("TOC Level 1");
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
        let entries = [entry(1, "Overview", 9), entry(2, "History", 9)];
        let text = rebuild_toc(&mut host, &config.background, &entries).unwrap();
        assert_eq!(text, "Overview\t9\nHistory\t9\n");
        assert!(
            host.reports
                .iter()
                .any(|r| r.contains("TOC Level 2")),
            "diagnostic should name the missing style"
        );
    }

    #[test]
    fn missing_target_frame_is_fatal() {
        let config = SyncConfig::default();
        let mut host = MemoryHost::new(24);
        host.define_style("TOC Level 1");
        let err = rebuild_toc(&mut host, &config.background, &[entry(1, "Overview", 9)])
            .unwrap_err();
        assert!(matches!(err, Error::MissingAnchor(name) if name == "TOC_Background"));
    }
}
