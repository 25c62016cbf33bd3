use std::fmt;

/// EMUs per inch. 1 inch = 914,400 EMUs.
pub const EMUS_PER_INCH: i64 = 914_400;

/// EMUs per centimeter. 1 cm = 360,000 EMUs.
pub const EMUS_PER_CM: i64 = 360_000;

/// EMUs per point (1/72 inch).
pub const EMUS_PER_POINT: i64 = 12_700;

/// Length measurement with units.
///
/// Represents a measurement value used for text-box margins and
/// similar dimensions. Presentation markup stores these natively in
/// EMUs (English Metric Units).
///
/// # Examples
///
/// ```rust
/// use quince::common::Length;
///
/// // Create from EMUs
/// let length = Length::from_emus(914400); // 1 inch
///
/// // Convert to different units
/// let inches = length.inches();
/// let points = length.points();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    /// Value in EMUs (English Metric Units)
    emus: i64,
}

impl Length {
    /// Create a length from EMUs (English Metric Units).
    ///
    /// - 1 inch = 914,400 EMUs
    /// - 1 cm = 360,000 EMUs
    /// - 1 point = 12,700 EMUs
    #[inline]
    pub const fn from_emus(emus: i64) -> Self {
        Self { emus }
    }

    /// Create a length from points (1/72 inch).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quince::common::Length;
    ///
    /// let length = Length::from_points(7.2);
    /// assert_eq!(length.emus(), 91440);
    /// ```
    #[inline]
    pub fn from_points(points: f64) -> Self {
        Self {
            emus: (points * EMUS_PER_POINT as f64) as i64,
        }
    }

    /// Get the value in EMUs.
    #[inline]
    pub const fn emus(&self) -> i64 {
        self.emus
    }

    /// Convert to inches.
    #[inline]
    pub fn inches(&self) -> f64 {
        self.emus as f64 / EMUS_PER_INCH as f64
    }

    /// Convert to centimeters.
    #[inline]
    pub fn cm(&self) -> f64 {
        self.emus as f64 / EMUS_PER_CM as f64
    }

    /// Convert to points (1/72 inch).
    #[inline]
    pub fn points(&self) -> f64 {
        self.emus as f64 / EMUS_PER_POINT as f64
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}pt", self.points())
    }
}
