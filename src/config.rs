//! Configuration for a synchronization pass.
//!
//! Everything that used to be a module-level constant in the predecessor
//! scripts lives in an explicit [`SyncConfig`] passed into the
//! synchronizer, so several book variants can be processed in one process
//! lifetime without cross-contamination.

use crate::scan::StylePriorityList;

/// Paragraph style names the standard book templates define.
pub const TOC_LEVEL_1: &str = "TOC Level 1";
pub const TOC_LEVEL_2: &str = "TOC Level 2";
pub const TOC_RULES: &str = "TOC Rules";
pub const HEADER_LEVEL_1: &str = "HEADER Level 1";
pub const HEADER_LEVEL_2: &str = "HEADER Level 2";
pub const HEADER_RULES: &str = "HEADER Rules";
pub const FOOTER_LEFT: &str = "FOOTER Left";
pub const FOOTER_RIGHT: &str = "FOOTER Right";

/// Pages at or before this boundary are front matter (cover through the
/// contents page) and never contribute headings.
pub const DEFAULT_FRONT_MATTER_BOUNDARY: u32 = 7;

/// Styles every book template is expected to define.
pub const EXPECTED_STYLES: &[&str] = &[
    TOC_LEVEL_1,
    TOC_LEVEL_2,
    TOC_RULES,
    HEADER_LEVEL_1,
    HEADER_LEVEL_2,
    HEADER_RULES,
    FOOTER_LEFT,
    FOOTER_RIGHT,
];

/// Named frames every book template is expected to contain.
pub const EXPECTED_FRAMES: &[&str] = &[
    "rules_start",
    "rules_end",
    "epilogue_page",
    "edition",
    "version_number",
    "full_title",
    "norules_title",
    "nopoints_title",
    "rules_links",
];

/// Page-geometry variant of the book being processed. The caller resolves
/// the naming convention that identifies the variant before invoking the
/// synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub enum BookVariant {
    /// Single-column footers at one fixed position.
    #[default]
    Standard,
    /// Double-sided layout: footers alternate between a left-hand position
    /// on even pages and a right-hand position on odd pages.
    Alternating,
    /// One fixed footer position that differs from the standard geometry.
    Fixed,
}

/// One TOC target: the frame the block is rendered into, the heading
/// styles that feed it, and the paragraph styles its lines are given.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct TocTarget {
    /// Name of the frame the TOC block is rendered into.
    pub frame: String,
    /// Name prefix for the generated hyperlink frames.
    pub link_prefix: String,
    /// Heading styles recognized for this target, in level order.
    pub heading_styles: StylePriorityList,
    /// Paragraph style applied to rendered lines of each level; parallel
    /// to `heading_styles`.
    pub toc_styles: Vec<String>,
}

/// Geometry of the generated hyperlink annotation frames.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct HyperlinkGeometry {
    pub frame_width: f64,
    /// The alternating and fixed variants use narrower contents frames.
    pub narrow_frame_width: f64,
    pub frame_height: f64,
    pub gap: f64,
    /// Vertical offset of the first link relative to the TOC frame.
    pub y_offset: f64,
    /// X position of the second column.
    pub column2_x: f64,
}

impl Default for HyperlinkGeometry {
    fn default() -> Self {
        Self {
            frame_width: 81.0,
            narrow_frame_width: 71.0,
            frame_height: 5.35,
            gap: 1.0,
            y_offset: -1.0,
            column2_x: 109.0,
        }
    }
}

/// Footer frame placement for one variant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub enum FooterGeometry {
    Standard { x: f64, y: f64 },
    Alternating { x_even: f64, x_odd: f64, y: f64 },
    Fixed { x: f64, y: f64 },
}

impl FooterGeometry {
    pub fn for_variant(variant: BookVariant) -> Self {
        match variant {
            BookVariant::Standard => Self::Standard { x: 20.0, y: 284.5 },
            BookVariant::Alternating => Self::Alternating {
                x_even: 23.0,
                x_odd: 115.5,
                y: 282.58,
            },
            BookVariant::Fixed => Self::Fixed {
                x: 20.0,
                y: 280.84,
            },
        }
    }
}

/// Running-footer settings: placement geometry, frame size, styles, and
/// the positional sweep that identifies existing footers for deletion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct FooterConfig {
    pub geometry: FooterGeometry,
    pub width: f64,
    pub height: f64,
    pub style_left: String,
    pub style_right: String,
    /// Rounded x positions recognized as existing footers.
    pub sweep_x: Vec<i64>,
    /// Rounded y positions recognized as existing footers.
    pub sweep_y: Vec<i64>,
    /// First page the delete sweep visits.
    pub sweep_start_page: u32,
}

impl FooterConfig {
    pub fn for_variant(variant: BookVariant) -> Self {
        Self {
            geometry: FooterGeometry::for_variant(variant),
            width: 70.0,
            height: 7.0,
            style_left: FOOTER_LEFT.to_string(),
            style_right: FOOTER_RIGHT.to_string(),
            sweep_x: vec![19, 20, 23, 116],
            sweep_y: (280..=289).collect(),
            sweep_start_page: 5,
        }
    }
}

/// Placement of the section-header frames over the rules pages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct RulesHeaderConfig {
    pub x: f64,
    /// Page height in the title coordinate system; titles measure from the
    /// bottom edge, frames from the top.
    pub page_height: f64,
    pub width: f64,
    pub height: f64,
    pub style: String,
}

impl Default for RulesHeaderConfig {
    fn default() -> Self {
        Self {
            x: 56.58,
            page_height: 841.89,
            width: 482.0,
            height: 45.0,
            style: HEADER_RULES.to_string(),
        }
    }
}

/// Complete configuration of one synchronization pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncConfig {
    pub variant: BookVariant,
    /// Pages at or before this boundary never contribute headings.
    pub front_matter_boundary: u32,
    /// The page carrying the rendered TOC and its hyperlinks.
    pub contents_page: u32,
    /// The background (narrative) TOC target.
    pub background: TocTarget,
    /// The rules TOC target.
    pub rules: TocTarget,
    pub hyperlinks: HyperlinkGeometry,
    pub footers: FooterConfig,
    pub rules_headers: RulesHeaderConfig,
    /// Layer the hyperlink and footer frames live on.
    pub hyperlink_layer: String,
    /// Layer the placed rules headers live on.
    pub notes_layer: String,
    /// Pages whose master-page name starts with this prefix get no footer.
    pub blank_master_prefix: String,
    /// Stable name given to the last background link so the epilogue
    /// renumbering step can retarget it without knowing its position.
    pub epilogue_link_name: String,
    /// Name given to the group of rules links.
    pub rules_group_name: String,
}

impl SyncConfig {
    /// The default configuration for a book variant: standard template
    /// frame names, styles, and geometry.
    pub fn for_variant(variant: BookVariant) -> Self {
        Self {
            variant,
            front_matter_boundary: DEFAULT_FRONT_MATTER_BOUNDARY,
            contents_page: 7,
            background: TocTarget {
                frame: "TOC_Background".to_string(),
                link_prefix: "bh".to_string(),
                heading_styles: StylePriorityList::new([HEADER_LEVEL_1, HEADER_LEVEL_2]),
                toc_styles: vec![TOC_LEVEL_1.to_string(), TOC_LEVEL_2.to_string()],
            },
            rules: TocTarget {
                frame: "TOC_Rules".to_string(),
                link_prefix: "rh".to_string(),
                heading_styles: StylePriorityList::new([HEADER_RULES]),
                toc_styles: vec![TOC_RULES.to_string()],
            },
            hyperlinks: HyperlinkGeometry::default(),
            footers: FooterConfig::for_variant(variant),
            rules_headers: RulesHeaderConfig::default(),
            hyperlink_layer: "Hyperlinks".to_string(),
            notes_layer: "Notes".to_string(),
            blank_master_prefix: "X".to_string(),
            epilogue_link_name: "bh_epilogue".to_string(),
            rules_group_name: "rules_links".to_string(),
        }
    }

    /// Width of the generated hyperlink frames for this variant.
    pub fn hyperlink_width(&self) -> f64 {
        match self.variant {
            BookVariant::Standard => self.hyperlinks.frame_width,
            BookVariant::Alternating | BookVariant::Fixed => self.hyperlinks.narrow_frame_width,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::for_variant(BookVariant::Standard)
    }
}
