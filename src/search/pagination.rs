use crate::search::filter::{parse_page, PAGE_KEY};
use crate::search::query::QueryParams;
use crate::search::types::{Navigation, SEARCH_PATH};

/// Page shown for the current URL, 1 when absent.
///
/// Pages past the end are passed through untouched.
pub fn current_page(query: &QueryParams) -> u32 {
    parse_page(&query.get_str(PAGE_KEY))
}

/// Navigation to page `page`, keeping every other query parameter
pub fn page_navigation(query: &QueryParams, page: u32) -> Navigation {
    let mut query = query.clone();
    query.set(PAGE_KEY, page.to_string());

    Navigation {
        pathname: SEARCH_PATH.to_string(),
        query,
        shallow: true,
    }
}

pub fn page_href(query: &QueryParams, page: u32) -> String {
    page_navigation(query, page).href()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItemKind {
    Previous,
    Page,
    Next,
}

/// One rendered control of the pagination bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    pub kind: PageItemKind,
    pub page: u32,
    pub href: String,
    /// Follow the link as a client-side URL update
    pub shallow: bool,
    pub selected: bool,
    pub disabled: bool,
}

/// Page links for a result set of `total_pages` pages
#[derive(Debug, Clone)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
    pub items: Vec<PageItem>,
}

impl Pagination {
    pub fn new(query: &QueryParams, total_pages: u32) -> Self {
        let current = current_page(query);
        let mut items = Vec::with_capacity(total_pages as usize + 2);

        let item = |kind, page| {
            let navigation = page_navigation(query, page);
            PageItem {
                kind,
                page,
                href: navigation.href(),
                shallow: navigation.shallow,
                selected: false,
                disabled: false,
            }
        };

        let previous = current.saturating_sub(1).max(1);
        items.push(PageItem {
            disabled: current <= 1,
            ..item(PageItemKind::Previous, previous)
        });

        for page in 1..=total_pages {
            items.push(PageItem {
                selected: page == current,
                ..item(PageItemKind::Page, page)
            });
        }

        items.push(PageItem {
            disabled: current >= total_pages,
            ..item(PageItemKind::Next, current.saturating_add(1))
        });

        Self {
            current,
            total_pages,
            items,
        }
    }

    pub fn pages(&self) -> impl Iterator<Item = &PageItem> {
        self.items
            .iter()
            .filter(|item| item.kind == PageItemKind::Page)
    }
}
