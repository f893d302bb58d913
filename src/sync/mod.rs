//! Derived-content synchronization.
//!
//! Consumes the ordered, leveled heading entries and rebuilds the three
//! derived artifacts — the rendered TOC blocks, the hyperlink annotation
//! set, and the running footers — through the [`DocumentHost`] trait.
//! Every artifact is deleted and recreated on every run, so repeated runs
//! converge to the same state instead of accumulating duplicates.

mod footers;
mod host;
mod hyperlinks;
mod memory;
mod rules_headers;
mod toc;

pub use footers::{create_footers, delete_footers, rebuild_footers};
pub use host::{DocumentHost, FrameKind, FrameQuery, NewFrame};
pub use hyperlinks::{create_hyperlinks, delete_hyperlinks, rebuild_hyperlinks};
pub use memory::{MemFrame, MemoryHost};
pub use rules_headers::{
    RulesTitle, place_rules_headers, rebuild_rules_headers, remove_rules_headers,
};
pub use toc::rebuild_toc;

use crate::config::SyncConfig;
use crate::error::Error;
use crate::scan::HeadingEntry;

/// Outcome of one synchronization pass. Sub-operations are isolated from
/// one another, so one failure never prevents the others from running;
/// whatever failed is collected here.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// `(entity, error)` pairs for the sub-operations that failed.
    pub failures: Vec<(String, Error)>,
}

impl SyncReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, entity: &str, result: Result<(), Error>) {
        if let Err(err) = result {
            log::error!("{entity}: {err}");
            self.failures.push((entity.to_string(), err));
        }
    }
}

/// Runs the synchronization sub-operations against a host document.
#[derive(Debug)]
pub struct Synchronizer<'a> {
    config: &'a SyncConfig,
}

impl<'a> Synchronizer<'a> {
    pub fn new(config: &'a SyncConfig) -> Self {
        Self { config }
    }

    /// Rebuild every derived artifact from the given entry sequences.
    ///
    /// `background` and `rules` are the ordered entries for the two TOC
    /// targets. Footer text follows the level-1 background headings plus
    /// the rules headings, merged in page order.
    pub fn synchronize<H: DocumentHost>(
        &self,
        host: &mut H,
        background: &[HeadingEntry],
        rules: &[HeadingEntry],
    ) -> SyncReport {
        let mut report = SyncReport::default();

        report.record(
            &self.config.background.frame,
            rebuild_toc(host, &self.config.background, background).map(drop),
        );
        report.record(
            &self.config.rules.frame,
            rebuild_toc(host, &self.config.rules, rules).map(drop),
        );
        report.record("hyperlinks", rebuild_hyperlinks(host, self.config));

        let footer_entries = footer_entries(background, rules);
        report.record(
            "footers",
            rebuild_footers(host, self.config, &footer_entries),
        );

        report
    }
}

/// Level-1 background headings and all rules headings, merged in page
/// order, drive the running footers.
fn footer_entries(background: &[HeadingEntry], rules: &[HeadingEntry]) -> Vec<HeadingEntry> {
    let mut entries: Vec<HeadingEntry> = background
        .iter()
        .filter(|e| e.level == 1)
        .chain(rules.iter())
        .cloned()
        .collect();
    entries.sort_by_key(|e| e.page);
    entries
}
