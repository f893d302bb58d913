//! An in-memory [`DocumentHost`] for dry-runs and tests.
//!
//! Tracks pages, layers, frames, text, styling, and link annotations with
//! the same failure semantics a real host exposes (missing styles, missing
//! frames), without rendering anything.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{Error, Result};
use crate::sync::host::{DocumentHost, FrameKind, FrameQuery, NewFrame};

/// One canvas object tracked by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct MemFrame {
    pub kind: FrameKind,
    /// 1-based page number.
    pub page: u32,
    pub layer: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub paragraph_style: Option<String>,
    /// `(start, len, style)` paragraph-style applications, char offsets.
    pub range_styles: Vec<(usize, usize, String)>,
    /// `(start, len, style)` character-style applications, char offsets.
    pub char_range_styles: Vec<(usize, usize, String)>,
    /// 0-based destination page of the link annotation, if any.
    pub link: Option<u32>,
}

/// In-memory document canvas.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    page_count: u32,
    current_page: u32,
    master_pages: HashMap<u32, String>,
    styles: HashSet<String>,
    char_styles: HashSet<String>,
    frames: BTreeMap<String, MemFrame>,
    groups: HashMap<String, Vec<String>>,
    name_counter: u32,
    /// Diagnostics surfaced through [`DocumentHost::report`].
    pub reports: Vec<String>,
}

impl MemoryHost {
    pub fn new(page_count: u32) -> Self {
        Self {
            page_count,
            current_page: 1,
            ..Self::default()
        }
    }

    /// Register a paragraph style as existing in the document.
    pub fn define_style(&mut self, name: impl Into<String>) -> &mut Self {
        self.styles.insert(name.into());
        self
    }

    /// Register a character style as existing in the document.
    pub fn define_char_style(&mut self, name: impl Into<String>) -> &mut Self {
        self.char_styles.insert(name.into());
        self
    }

    /// Assign a master-page template name to a page.
    pub fn set_master_page(&mut self, page: u32, name: impl Into<String>) -> &mut Self {
        self.master_pages.insert(page, name.into());
        self
    }

    /// Place a pre-existing frame on the canvas (a TOC anchor frame, an
    /// image frame), bypassing the creation checks.
    pub fn seed(&mut self, name: &str, kind: FrameKind, frame: &NewFrame<'_>) -> &mut Self {
        self.frames.insert(
            name.to_string(),
            MemFrame {
                kind,
                page: frame.page,
                layer: frame.layer.to_string(),
                x: frame.x,
                y: frame.y,
                width: frame.width,
                height: frame.height,
                text: String::new(),
                paragraph_style: None,
                range_styles: Vec::new(),
                char_range_styles: Vec::new(),
                link: None,
            },
        );
        self
    }

    pub fn frame(&self, name: &str) -> Option<&MemFrame> {
        self.frames.get(name)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    fn get(&self, name: &str) -> Result<&MemFrame> {
        self.frames
            .get(name)
            .ok_or_else(|| Error::MissingAnchor(name.to_string()))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut MemFrame> {
        self.frames
            .get_mut(name)
            .ok_or_else(|| Error::MissingAnchor(name.to_string()))
    }

    fn check_style(&self, style: &str) -> Result<()> {
        if self.styles.contains(style) {
            Ok(())
        } else {
            Err(Error::MissingStyle(style.to_string()))
        }
    }

    fn check_range(frame: &MemFrame, name: &str, start: usize, len: usize) -> Result<()> {
        let chars = frame.text.chars().count();
        if start + len > chars {
            return Err(Error::InvalidDocument(format!(
                "range {start}+{len} out of bounds for {name:?} ({chars} chars)"
            )));
        }
        Ok(())
    }
}

impl DocumentHost for MemoryHost {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn master_page(&self, page: u32) -> Option<String> {
        self.master_pages.get(&page).cloned()
    }

    fn goto_page(&mut self, page: u32) {
        self.current_page = page;
    }

    fn frames(&self, query: &FrameQuery<'_>) -> Vec<String> {
        self.frames
            .iter()
            .filter(|(_, f)| query.kind.is_none_or(|k| f.kind == k))
            .filter(|(_, f)| query.layer.is_none_or(|l| f.layer == l))
            .filter(|(_, f)| query.page.is_none_or(|p| f.page == p))
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn frame_text(&self, frame: &str) -> Result<String> {
        Ok(self.get(frame)?.text.clone())
    }

    fn set_frame_text(&mut self, frame: &str, text: &str) -> Result<()> {
        let f = self.get_mut(frame)?;
        f.text = text.to_string();
        // Old range styling does not survive a text replacement.
        f.range_styles.clear();
        f.char_range_styles.clear();
        Ok(())
    }

    fn paragraph_style(&self, frame: &str) -> Result<Option<String>> {
        Ok(self.get(frame)?.paragraph_style.clone())
    }

    fn set_paragraph_style(&mut self, frame: &str, style: &str) -> Result<()> {
        self.check_style(style)?;
        self.get_mut(frame)?.paragraph_style = Some(style.to_string());
        Ok(())
    }

    fn set_paragraph_style_range(
        &mut self,
        frame: &str,
        start: usize,
        len: usize,
        style: &str,
    ) -> Result<()> {
        self.check_style(style)?;
        let f = self.get_mut(frame)?;
        Self::check_range(f, frame, start, len)?;
        f.range_styles.push((start, len, style.to_string()));
        Ok(())
    }

    fn set_character_style_range(
        &mut self,
        frame: &str,
        start: usize,
        len: usize,
        style: &str,
    ) -> Result<()> {
        if !self.char_styles.contains(style) {
            return Err(Error::MissingStyle(style.to_string()));
        }
        let f = self.get_mut(frame)?;
        Self::check_range(f, frame, start, len)?;
        f.char_range_styles.push((start, len, style.to_string()));
        Ok(())
    }

    fn position(&self, frame: &str) -> Result<(f64, f64)> {
        let f = self.get(frame)?;
        Ok((f.x, f.y))
    }

    fn size(&self, frame: &str) -> Result<(f64, f64)> {
        let f = self.get(frame)?;
        Ok((f.width, f.height))
    }

    fn set_position(&mut self, frame: &str, x: f64, y: f64) -> Result<()> {
        let f = self.get_mut(frame)?;
        f.x = x;
        f.y = y;
        Ok(())
    }

    fn set_size(&mut self, frame: &str, width: f64, height: f64) -> Result<()> {
        let f = self.get_mut(frame)?;
        f.width = width;
        f.height = height;
        Ok(())
    }

    fn create_text_frame(&mut self, frame: &NewFrame<'_>) -> Result<String> {
        if frame.page == 0 || frame.page > self.page_count {
            return Err(Error::InvalidDocument(format!(
                "page {} out of range (document has {} pages)",
                frame.page, self.page_count
            )));
        }
        let name = match frame.name {
            Some(name) => {
                if self.frames.contains_key(name) {
                    return Err(Error::InvalidDocument(format!(
                        "frame name {name:?} already in use"
                    )));
                }
                name.to_string()
            }
            None => {
                self.name_counter += 1;
                format!("Text{}", self.name_counter)
            }
        };
        self.seed(&name, FrameKind::Text, frame);
        Ok(name)
    }

    fn delete_frame(&mut self, frame: &str) -> Result<()> {
        if self.frames.remove(frame).is_none() {
            return Err(Error::MissingAnchor(frame.to_string()));
        }
        for members in self.groups.values_mut() {
            members.retain(|m| m != frame);
        }
        self.groups.retain(|_, members| !members.is_empty());
        Ok(())
    }

    fn rename_frame(&mut self, frame: &str, new_name: &str) -> Result<()> {
        if self.frames.contains_key(new_name) {
            return Err(Error::InvalidDocument(format!(
                "frame name {new_name:?} already in use"
            )));
        }
        let f = self
            .frames
            .remove(frame)
            .ok_or_else(|| Error::MissingAnchor(frame.to_string()))?;
        self.frames.insert(new_name.to_string(), f);
        for members in self.groups.values_mut() {
            for m in members.iter_mut() {
                if m == frame {
                    *m = new_name.to_string();
                }
            }
        }
        Ok(())
    }

    fn group_frames(&mut self, frames: &[String], name: &str) -> Result<()> {
        for frame in frames {
            self.get(frame)?;
        }
        self.groups.insert(name.to_string(), frames.to_vec());
        Ok(())
    }

    fn set_link_annotation(&mut self, frame: &str, destination_page: u32) -> Result<()> {
        self.get_mut(frame)?.link = Some(destination_page);
        Ok(())
    }

    fn report(&mut self, message: &str) {
        log::warn!("{message}");
        self.reports.push(message.to_string());
    }
}
