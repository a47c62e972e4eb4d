/// Brand accent used by markers, extrusions and fallback patterns.
pub const ACCENT_HEX: &str = "#C4A052";
const ACCENT_RGB: (u8, u8, u8) = (196, 160, 82);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerRing {
    pub width_px: u32,
    pub alpha: f32,
}

/// Custom DOM marker: a glowing accent dot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    pub size_px: u32,
    pub ring: Option<MarkerRing>,
    pub glow_px: u32,
    pub glow_alpha: f32,
}

impl MarkerStyle {
    /// Large ringed dot for a single-city map.
    pub const fn city() -> Self {
        Self {
            size_px: 20,
            ring: Some(MarkerRing {
                width_px: 3,
                alpha: 0.3,
            }),
            glow_px: 20,
            glow_alpha: 0.5,
        }
    }

    pub const fn overview() -> Self {
        Self {
            size_px: 12,
            ring: None,
            glow_px: 15,
            glow_alpha: 0.6,
        }
    }

    pub fn to_css(&self) -> String {
        let (r, g, b) = ACCENT_RGB;
        let mut css = format!(
            "width: {size}px; height: {size}px; background: {ACCENT_HEX}; border-radius: 50%;",
            size = self.size_px
        );
        if let Some(ring) = self.ring {
            css.push_str(&format!(
                " border: {}px solid rgba({r}, {g}, {b}, {});",
                ring.width_px, ring.alpha
            ));
        }
        css.push_str(&format!(
            " box-shadow: 0 0 {}px rgba({r}, {g}, {b}, {});",
            self.glow_px, self.glow_alpha
        ));
        css
    }

    /// Inner markup for the marker element.
    pub fn to_html(&self) -> String {
        format!("<div style=\"{}\"></div>", self.to_css())
    }
}
