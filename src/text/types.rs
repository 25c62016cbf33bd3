//! Enumerated text formatting values and their markup spellings.

/// Vertical anchoring of text within its box (`bodyPr` `anchor`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextVerticalAlignment {
    /// Anchored to the top (`t`), the markup default
    #[default]
    Top,
    /// Centered (`ctr`)
    Middle,
    /// Anchored to the bottom (`b`)
    Bottom,
}

impl TextVerticalAlignment {
    /// Parse from the `anchor` attribute value.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "t" => Some(Self::Top),
            "ctr" => Some(Self::Middle),
            "b" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// The `anchor` attribute value for this alignment.
    pub const fn attr_value(&self) -> &'static str {
        match self {
            Self::Top => "t",
            Self::Middle => "ctr",
            Self::Bottom => "b",
        }
    }
}

/// How a text box reacts when its content outgrows it.
///
/// Expressed in markup as a child element of `bodyPr`; absence of both
/// children means no autofit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutofitType {
    /// Text overflows without adjustment
    #[default]
    None,
    /// Font scales down to fit (`normAutofit`)
    Shrink,
    /// The shape grows to fit (`spAutoFit`)
    Resize,
}

impl AutofitType {
    /// Parse from the local tag of a `bodyPr` autofit child.
    pub fn from_element(local_tag: &str) -> Option<Self> {
        match local_tag {
            "normAutofit" => Some(Self::Shrink),
            "spAutoFit" => Some(Self::Resize),
            _ => None,
        }
    }

    /// The qualified element name for this autofit, if it has one.
    pub const fn element_name(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Shrink => Some("a:normAutofit"),
            Self::Resize => Some("a:spAutoFit"),
        }
    }
}

/// Text flow direction within a box (`bodyPr` `vert`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextDirection {
    /// Ordinary horizontal flow (`horz`)
    #[default]
    Horizontal,
    /// Rotated 90 degrees clockwise (`vert`)
    Rotate90,
    /// Rotated 270 degrees clockwise (`vert270`)
    Rotate270,
    /// Stacked one character per line (`wordArtVert`)
    Stacked,
}

impl TextDirection {
    /// Parse from the `vert` attribute value.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "horz" => Some(Self::Horizontal),
            "vert" => Some(Self::Rotate90),
            "vert270" => Some(Self::Rotate270),
            "wordArtVert" => Some(Self::Stacked),
            _ => None,
        }
    }

    /// The `vert` attribute value for this direction.
    pub const fn attr_value(&self) -> &'static str {
        match self {
            Self::Horizontal => "horz",
            Self::Rotate90 => "vert",
            Self::Rotate270 => "vert270",
            Self::Stacked => "wordArtVert",
        }
    }
}

/// Horizontal paragraph alignment (`pPr` `algn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    /// Left-aligned (`l`)
    Left,
    /// Centered (`ctr`)
    Center,
    /// Right-aligned (`r`)
    Right,
    /// Justified (`just`)
    Justify,
}

impl TextAlignment {
    /// Parse from the `algn` attribute value.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "l" => Some(Self::Left),
            "ctr" => Some(Self::Center),
            "r" => Some(Self::Right),
            "just" => Some(Self::Justify),
            _ => None,
        }
    }

    /// The `algn` attribute value for this alignment.
    pub const fn attr_value(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
            Self::Justify => "just",
        }
    }
}

/// How a font color is expressed at its resolution site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    /// A literal RGB value
    Rgb,
    /// A theme scheme reference
    Theme,
}
