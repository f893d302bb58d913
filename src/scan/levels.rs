//! Ordering and level assignment for scanned heading candidates.

use super::scanner::HeadingCandidate;

/// Ordered list of heading style names; list position determines the
/// hierarchy level (first style is level 1). A style not in the list is
/// not a heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct StylePriorityList {
    styles: Vec<String>,
}

impl StylePriorityList {
    pub fn new<I, S>(styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            styles: styles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    /// The 1-based level of a style, or `None` when the style is not a
    /// heading style.
    pub fn level_of(&self, style: &str) -> Option<u32> {
        self.styles
            .iter()
            .position(|s| s == style)
            .map(|i| i as u32 + 1)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// A leveled table-of-contents entry. Entries are totally ordered by
/// `(page, vertical position, source order)` ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingEntry {
    /// 1-based hierarchy level from the style priority list.
    pub level: u32,
    pub text: String,
    /// 1-based printed page number.
    pub page: u32,
}

/// Sort candidates into the stable total order and assign levels from the
/// priority list.
///
/// Ties on page and vertical position fall back to source order, so the
/// result is deterministic for identical input. A candidate whose style is
/// absent from the list is dropped; so is one whose text is empty once
/// control characters are stripped. No hierarchy inference happens beyond
/// the flat style-to-level mapping.
pub fn order_and_level(
    mut candidates: Vec<HeadingCandidate>,
    priority: &StylePriorityList,
) -> Vec<HeadingEntry> {
    candidates.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then(a.y_pos.total_cmp(&b.y_pos))
            .then(a.source_order.cmp(&b.source_order))
    });

    candidates
        .into_iter()
        .filter_map(|candidate| {
            let Some(level) = priority.level_of(&candidate.style) else {
                log::debug!(
                    "dropping candidate {:?}: style {:?} is not in the priority list",
                    candidate.text,
                    candidate.style
                );
                return None;
            };
            let text = clean_text(&candidate.text);
            if text.is_empty() {
                return None;
            }
            Some(HeadingEntry {
                level,
                text,
                page: candidate.page,
            })
        })
        .collect()
}

/// Strip control characters and surrounding whitespace; a heading with a
/// stray tab or carriage return would corrupt the rendered TOC lines.
fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(style: &str, page: u32, y_pos: f64, source_order: u32) -> HeadingCandidate {
        HeadingCandidate {
            text: format!("{style} p{page} y{y_pos} o{source_order}"),
            style: style.to_string(),
            page,
            y_pos,
            source_order,
        }
    }

    fn priority() -> StylePriorityList {
        StylePriorityList::new(["H1", "H2"])
    }

    #[test]
    fn level_follows_list_position_not_document_position() {
        let entries = order_and_level(
            vec![candidate("H2", 20, 0.0, 0), candidate("H2", 3, 0.0, 1)],
            &priority(),
        );
        assert!(entries.iter().all(|e| e.level == 2));
    }

    #[test]
    fn page_then_y_pos_then_source_order() {
        let entries = order_and_level(
            vec![
                candidate("H1", 12, 10.0, 3),
                candidate("H1", 9, 500.0, 2),
                candidate("H1", 9, 40.0, 1),
                candidate("H1", 9, 40.0, 0),
            ],
            &priority(),
        );
        let order: Vec<_> = entries.iter().map(|e| e.text.as_str()).collect();
        // Page first, then vertical position; equal page and position fall
        // back to source order.
        assert_eq!(
            order,
            vec![
                "H1 p9 y40 o0",
                "H1 p9 y40 o1",
                "H1 p9 y500 o2",
                "H1 p12 y10 o3"
            ]
        );
    }

    #[test]
    fn unlisted_style_is_dropped() {
        let entries = order_and_level(
            vec![candidate("H1", 9, 0.0, 0), candidate("Body", 9, 1.0, 1)],
            &priority(),
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, 1);
    }

    #[test]
    fn control_characters_are_stripped() {
        let mut raw = candidate("H1", 9, 0.0, 0);
        raw.text = "Over\tview\r".to_string();
        let entries = order_and_level(vec![raw], &priority());
        assert_eq!(entries[0].text, "Overview");
    }

    #[test]
    fn control_only_text_is_dropped() {
        let mut raw = candidate("H1", 9, 0.0, 0);
        raw.text = "\t\r\n".to_string();
        assert!(order_and_level(vec![raw], &priority()).is_empty());
    }
}
