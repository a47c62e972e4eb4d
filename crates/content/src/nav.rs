//! Navigation chrome for both sites.

use serde::Deserialize;

/// Scroll offset past which the travel header switches to its solid style.
pub const SCROLL_THRESHOLD_PX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

const fn link(href: &'static str, label: &'static str) -> NavLink {
    NavLink { href, label }
}

const TRAVEL_LINKS: &[NavLink] = &[
    link("/journeys", "Journeys"),
    link("/epic", "Epic"),
    link("/stories", "Stories"),
    link("/places", "Places"),
    link("/about", "About"),
];

const ARCHIVE_LINKS: &[NavLink] = &[
    link("/artists", "Artists"),
    link("/works", "Works"),
    link("/movements", "Movements"),
    link("/cities", "Cities"),
    link("/themes", "Themes"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Site {
    #[default]
    Travel,
    ArtArchive,
}

impl Site {
    pub fn brand(self) -> &'static str {
        match self {
            Site::Travel => "SLOW MOROCCO",
            Site::ArtArchive => "Morocco Art Archive",
        }
    }

    pub fn links(self) -> &'static [NavLink] {
        match self {
            Site::Travel => TRAVEL_LINKS,
            Site::ArtArchive => ARCHIVE_LINKS,
        }
    }

    /// The trailing action in the nav bar.
    pub fn action(self) -> NavLink {
        match self {
            Site::Travel => link("/plan-your-trip", "Plan Your Trip"),
            Site::ArtArchive => link("/search", "Search"),
        }
    }
}

/// Scroll and mobile-menu state of a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderState {
    scrolled: bool,
    menu_open: bool,
}

impl HeaderState {
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Returns true when the scrolled flag changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > SCROLL_THRESHOLD_PX;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Following any menu link closes the menu.
    pub fn on_link_click(&mut self) {
        self.menu_open = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterEntry {
    pub label: &'static str,
    pub href: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterColumn {
    pub heading: &'static str,
    pub entries: &'static [FooterEntry],
}

const fn entry(label: &'static str, href: &'static str) -> FooterEntry {
    FooterEntry {
        label,
        href: Some(href),
    }
}

const fn text(label: &'static str) -> FooterEntry {
    FooterEntry { label, href: None }
}

pub struct ArchiveFooter;

impl ArchiveFooter {
    pub const BLURB: &'static str = "A living record of Moroccan visual art from the 20th century to today. Painting and photography.";
    pub const COPYRIGHT: &'static str = "© 2026 Morocco Art Archive";
    pub const MOTTO: &'static str = "Data as Art · Art as Data";

    pub const COLUMNS: &'static [FooterColumn] = &[
        FooterColumn {
            heading: "Explore",
            entries: &[
                entry("Artists", "/artists"),
                entry("Works", "/works"),
                entry("Movements", "/movements"),
                entry("Cities", "/cities"),
                entry("Themes", "/themes"),
            ],
        },
        FooterColumn {
            heading: "Medium",
            entries: &[entry("Painting", "/painting"), entry("Photography", "/photography")],
        },
        FooterColumn {
            heading: "Data",
            entries: &[entry("API", "/api/v1/artists"), entry("Search", "/search")],
        },
        FooterColumn {
            heading: "Info",
            entries: &[text("Dancing with Lions"), text("Casablanca, Morocco")],
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_only_past_threshold() {
        let mut header = HeaderState::default();
        assert!(!header.on_scroll(50.0));
        assert!(!header.is_scrolled());
        assert!(header.on_scroll(50.5));
        assert!(header.is_scrolled());
        assert!(!header.on_scroll(400.0));
        assert!(header.on_scroll(0.0));
        assert!(!header.is_scrolled());
    }

    #[test]
    fn menu_toggles_and_closes_on_link_click() {
        let mut header = HeaderState::default();
        header.toggle_menu();
        assert!(header.is_menu_open());
        header.on_link_click();
        assert!(!header.is_menu_open());
        header.toggle_menu();
        header.toggle_menu();
        assert!(!header.is_menu_open());
    }

    #[test]
    fn sites_have_their_own_links() {
        let travel: Vec<_> = Site::Travel.links().iter().map(|l| l.label).collect();
        assert_eq!(travel, ["Journeys", "Epic", "Stories", "Places", "About"]);
        assert_eq!(Site::Travel.action().href, "/plan-your-trip");
        assert_eq!(Site::ArtArchive.links()[2].href, "/movements");
        assert_eq!(Site::ArtArchive.action().label, "Search");
    }

    #[test]
    fn footer_info_column_has_no_links() {
        let info = ArchiveFooter::COLUMNS.last().unwrap();
        assert_eq!(info.heading, "Info");
        assert!(info.entries.iter().all(|e| e.href.is_none()));
    }
}
