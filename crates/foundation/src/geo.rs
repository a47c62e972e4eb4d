/// A WGS84 position in degrees, longitude first (the order map engines expect).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// `[lng, lat]`, the array form used by engine APIs.
    pub fn to_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    pub fn is_valid(self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }

    /// Exact coordinate equality; aliases of one place share identical values.
    pub fn same_position(self, other: LngLat) -> bool {
        self.lng.to_bits() == other.lng.to_bits() && self.lat.to_bits() == other.lat.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::LngLat;

    #[test]
    fn array_is_longitude_first() {
        let p = LngLat::new(-7.5898, 33.5731);
        assert_eq!(p.to_array(), [-7.5898, 33.5731]);
    }

    #[test]
    fn validity_bounds() {
        assert!(LngLat::new(180.0, -90.0).is_valid());
        assert!(!LngLat::new(181.0, 0.0).is_valid());
        assert!(!LngLat::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn same_position_is_exact() {
        let a = LngLat::new(-5.0003, 34.0331);
        assert!(a.same_position(LngLat::new(-5.0003, 34.0331)));
        assert!(!a.same_position(LngLat::new(-5.0004, 34.0331)));
    }
}
