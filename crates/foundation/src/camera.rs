use crate::geo::LngLat;

/// Initial camera for a map view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub center: LngLat,
    pub zoom: f64,
    /// Tilt away from nadir, degrees.
    pub pitch_deg: f64,
    /// Rotation from north, degrees.
    pub bearing_deg: f64,
}

impl CameraPose {
    pub const fn top_down(center: LngLat, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            pitch_deg: 0.0,
            bearing_deg: 0.0,
        }
    }

    pub const fn tilted(mut self, pitch_deg: f64, bearing_deg: f64) -> Self {
        self.pitch_deg = pitch_deg;
        self.bearing_deg = bearing_deg;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::CameraPose;
    use crate::geo::LngLat;

    #[test]
    fn tilted_keeps_center_and_zoom() {
        let pose = CameraPose::top_down(LngLat::new(1.0, 2.0), 12.0).tilted(45.0, -17.6);
        assert_eq!(pose.center, LngLat::new(1.0, 2.0));
        assert_eq!(pose.zoom, 12.0);
        assert_eq!(pose.pitch_deg, 45.0);
        assert_eq!(pose.bearing_deg, -17.6);
    }
}
