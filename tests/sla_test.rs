//! Loader tests over the minimal fixture document.

use slatoc::{StoryNode, read_sla, read_sla_from_str};

const MINIMAL_SLA: &str = include_str!("fixtures/minimal.sla");

#[test]
fn loads_the_label_table() {
    let doc = read_sla_from_str(MINIMAL_SLA).unwrap();
    assert_eq!(doc.labels.len(), 2);
    assert_eq!(doc.labels.resolve("army_name").unwrap(), "Highborn Elves");
    assert_eq!(doc.labels.resolve("edition").unwrap(), "2nd Edition");
    assert!(doc.labels.resolve("points_version").is_err());
}

#[test]
fn loads_text_frames_in_document_order() {
    let doc = read_sla_from_str(MINIMAL_SLA).unwrap();

    // Five text frames; the image frame is not loaded.
    assert_eq!(doc.frames.len(), 5);

    let toc = &doc.frames[0];
    assert_eq!(toc.name.as_deref(), Some("TOC_Background"));
    // OwnPage is 0-based in the file.
    assert_eq!(toc.page, 7);
    assert_eq!(toc.y_pos, 120.0);
    assert_eq!(toc.layer.as_deref(), Some("Background"));
    assert_eq!(toc.default_style.as_deref(), Some("Body"));

    let footer = &doc.frames[4];
    assert_eq!(footer.layer.as_deref(), Some("Hyperlinks"));
}

#[test]
fn story_nodes_map_onto_the_closed_variant_set() {
    let doc = read_sla_from_str(MINIMAL_SLA).unwrap();

    let title = &doc.frames[1];
    assert_eq!(
        title.nodes,
        vec![
            StoryNode::StyleMarker("HEADER Level 1".to_string()),
            StoryNode::CrossRef("army_name".to_string()),
            StoryNode::ParagraphBreak(Some("HEADER Level 1".to_string())),
        ]
    );

    let rules = &doc.frames[3];
    assert_eq!(
        rules.nodes,
        vec![
            StoryNode::StyleMarker("HEADER Level 1".to_string()),
            StoryNode::TextRun("Rules of".to_string()),
            StoryNode::LineBreak,
            StoryNode::TextRun("Engagement".to_string()),
            StoryNode::ParagraphBreak(Some("HEADER Level 1".to_string())),
        ]
    );

    // A trailing paragraph element without a style reference.
    let history = &doc.frames[2];
    assert_eq!(
        history.nodes.last(),
        Some(&StoryNode::ParagraphBreak(None))
    );
}

#[test]
fn loads_styles_master_pages_and_page_count() {
    let doc = read_sla_from_str(MINIMAL_SLA).unwrap();

    assert_eq!(doc.page_count, 24);
    assert!(doc.styles.iter().any(|s| s == "HEADER Level 1"));
    assert!(doc.styles.iter().any(|s| s == "FOOTER Left"));

    assert_eq!(doc.master_pages.get(&1).map(String::as_str), Some("Cover"));
    assert_eq!(doc.master_pages.get(&9).map(String::as_str), Some("A1"));
    assert_eq!(
        doc.master_pages.get(&10).map(String::as_str),
        Some("X-Blank")
    );
}

#[test]
fn validation_reports_missing_frames_and_styles() {
    let doc = read_sla_from_str(MINIMAL_SLA).unwrap();

    assert!(doc.missing_frames(&["TOC_Background"]).is_empty());
    assert_eq!(
        doc.missing_frames(&["TOC_Background", "rules_start"]),
        vec!["rules_start"]
    );

    assert!(doc.missing_styles(&["HEADER Level 1", "TOC Level 2"]).is_empty());
    assert_eq!(doc.missing_styles(&["TOC Rules"]), vec!["TOC Rules"]);
}

#[test]
fn reads_from_a_file_on_disk() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(MINIMAL_SLA.as_bytes()).expect("write fixture");

    let doc = read_sla(file.path()).unwrap();
    assert_eq!(doc.frames.len(), 5);
    assert_eq!(doc.labels.resolve("army_name").unwrap(), "Highborn Elves");
}
