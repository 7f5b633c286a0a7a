mod integration_tests;

use crate::config::DEFAULT_NAV_SELECTORS;
use crate::filter::DocLinkFilter;
use crate::parsers::ExtractContext;
use scraper::Selector;

pub(super) const BASE: &str = "https://ex.com/docs";

/// Owns what an `ExtractContext` borrows
pub(super) struct Fixture {
    filter: DocLinkFilter,
    selectors: Vec<Selector>,
}

impl Fixture {
    pub(super) fn new() -> Self {
        Self {
            filter: DocLinkFilter::default(),
            selectors: DEFAULT_NAV_SELECTORS
                .iter()
                .map(|s| Selector::parse(s).unwrap())
                .collect(),
        }
    }

    pub(super) fn ctx(&self) -> ExtractContext<'_> {
        ExtractContext {
            base_url: BASE,
            filter: &self.filter,
            nav_selectors: &self.selectors,
        }
    }
}
