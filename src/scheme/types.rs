//! Scheme color slots, theme color schemes, and color mappings.
use crate::common::RGBColor;
use crate::xml::{NodeId, XmlTree};

/// A named slot in a presentation color scheme.
///
/// Twelve canonical slots are defined by the theme itself. The four
/// mapped names (`bg1`, `tx1`, `bg2`, `tx2`) never appear in a theme;
/// they are redirected to a canonical slot through the color mapping
/// of the nearest master/layout before lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeSlot {
    /// Primary dark color (`dk1`)
    Dark1,
    /// Primary light color (`lt1`)
    Light1,
    /// Secondary dark color (`dk2`)
    Dark2,
    /// Secondary light color (`lt2`)
    Light2,
    /// Accent color 1
    Accent1,
    /// Accent color 2
    Accent2,
    /// Accent color 3
    Accent3,
    /// Accent color 4
    Accent4,
    /// Accent color 5
    Accent5,
    /// Accent color 6
    Accent6,
    /// Hyperlink color (`hlink`)
    Hyperlink,
    /// Followed hyperlink color (`folHlink`)
    FollowedHyperlink,
    /// Mapped background 1 (`bg1`), requires color-mapping indirection
    Background1,
    /// Mapped text 1 (`tx1`), requires color-mapping indirection
    Text1,
    /// Mapped background 2 (`bg2`), requires color-mapping indirection
    Background2,
    /// Mapped text 2 (`tx2`), requires color-mapping indirection
    Text2,
}

/// Scheme slot names as they appear in markup.
static SLOT_NAMES: phf::Map<&'static str, SchemeSlot> = phf::phf_map! {
    "dk1" => SchemeSlot::Dark1,
    "lt1" => SchemeSlot::Light1,
    "dk2" => SchemeSlot::Dark2,
    "lt2" => SchemeSlot::Light2,
    "accent1" => SchemeSlot::Accent1,
    "accent2" => SchemeSlot::Accent2,
    "accent3" => SchemeSlot::Accent3,
    "accent4" => SchemeSlot::Accent4,
    "accent5" => SchemeSlot::Accent5,
    "accent6" => SchemeSlot::Accent6,
    "hlink" => SchemeSlot::Hyperlink,
    "folHlink" => SchemeSlot::FollowedHyperlink,
    "bg1" => SchemeSlot::Background1,
    "tx1" => SchemeSlot::Text1,
    "bg2" => SchemeSlot::Background2,
    "tx2" => SchemeSlot::Text2,
};

impl SchemeSlot {
    /// Parse a slot from its markup name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quince::scheme::SchemeSlot;
    ///
    /// assert_eq!(SchemeSlot::from_name("accent2"), Some(SchemeSlot::Accent2));
    /// assert_eq!(SchemeSlot::from_name("chartreuse"), None);
    /// ```
    #[inline]
    pub fn from_name(name: &str) -> Option<Self> {
        SLOT_NAMES.get(name).copied()
    }

    /// The markup name of this slot.
    pub const fn name(&self) -> &'static str {
        match self {
            SchemeSlot::Dark1 => "dk1",
            SchemeSlot::Light1 => "lt1",
            SchemeSlot::Dark2 => "dk2",
            SchemeSlot::Light2 => "lt2",
            SchemeSlot::Accent1 => "accent1",
            SchemeSlot::Accent2 => "accent2",
            SchemeSlot::Accent3 => "accent3",
            SchemeSlot::Accent4 => "accent4",
            SchemeSlot::Accent5 => "accent5",
            SchemeSlot::Accent6 => "accent6",
            SchemeSlot::Hyperlink => "hlink",
            SchemeSlot::FollowedHyperlink => "folHlink",
            SchemeSlot::Background1 => "bg1",
            SchemeSlot::Text1 => "tx1",
            SchemeSlot::Background2 => "bg2",
            SchemeSlot::Text2 => "tx2",
        }
    }

    /// Whether the slot is one of the twelve defined by a theme.
    pub const fn is_canonical(&self) -> bool {
        !matches!(
            self,
            SchemeSlot::Background1
                | SchemeSlot::Text1
                | SchemeSlot::Background2
                | SchemeSlot::Text2
        )
    }
}

/// A color expressed either directly or as a scheme reference.
///
/// The tagged variant keeps resolution logic in one place: an `Rgb`
/// value is final, a `Scheme` value must go through the mapping chain
/// and theme lookup of its context before it can be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// A literal RGB value
    Rgb(RGBColor),
    /// A reference to a scheme slot, resolved at read time
    Scheme(SchemeSlot),
}

/// The fixed slot-to-RGB mapping owned by a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorScheme {
    slots: [Option<RGBColor>; 12],
}

impl ColorScheme {
    fn slot_index(slot: SchemeSlot) -> Option<usize> {
        match slot {
            SchemeSlot::Dark1 => Some(0),
            SchemeSlot::Light1 => Some(1),
            SchemeSlot::Dark2 => Some(2),
            SchemeSlot::Light2 => Some(3),
            SchemeSlot::Accent1 => Some(4),
            SchemeSlot::Accent2 => Some(5),
            SchemeSlot::Accent3 => Some(6),
            SchemeSlot::Accent4 => Some(7),
            SchemeSlot::Accent5 => Some(8),
            SchemeSlot::Accent6 => Some(9),
            SchemeSlot::Hyperlink => Some(10),
            SchemeSlot::FollowedHyperlink => Some(11),
            _ => None,
        }
    }

    /// Look up a canonical slot. Mapped names always return `None`;
    /// they must be redirected through a [`ColorMapping`] first.
    pub fn get(&self, slot: SchemeSlot) -> Option<RGBColor> {
        Self::slot_index(slot).and_then(|i| self.slots[i])
    }

    /// Set a slot's RGB value (canonical slots only; mapped names are
    /// ignored).
    pub fn set(&mut self, slot: SchemeSlot, rgb: RGBColor) {
        if let Some(i) = Self::slot_index(slot) {
            self.slots[i] = Some(rgb);
        }
    }

    /// Read a scheme from a `clrScheme` element.
    ///
    /// Each slot child wraps either `<a:srgbClr val="RRGGBB"/>` or a
    /// `<a:sysClr .. lastClr="RRGGBB"/>` system color; slots with no
    /// parsable value stay unset.
    pub fn from_node(tree: &XmlTree, clr_scheme: NodeId) -> Self {
        let mut scheme = Self::default();
        for &slot_node in tree.all_children(clr_scheme) {
            let Some(slot) = SchemeSlot::from_name(tree.local_tag(slot_node)) else {
                continue;
            };
            let rgb = tree
                .child(slot_node, "srgbClr")
                .and_then(|c| tree.attribute(c, "val"))
                .or_else(|| {
                    tree.child(slot_node, "sysClr")
                        .and_then(|c| tree.attribute(c, "lastClr"))
                })
                .and_then(RGBColor::from_hex);
            if let Some(rgb) = rgb {
                scheme.set(slot, rgb);
            }
        }
        scheme
    }
}

/// A per-master/layout/slide override redirecting slot names.
///
/// Parsed from `clrMap` (masters) or `clrMapOvr` (layouts/slides)
/// attributes: the attribute name is the slot being redirected and the
/// value the slot it should resolve as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMapping {
    entries: Vec<(SchemeSlot, SchemeSlot)>,
}

impl ColorMapping {
    /// Read a mapping from a `clrMap`-shaped element's attributes.
    ///
    /// Attributes whose name or value is not a known slot are skipped.
    pub fn from_node(tree: &XmlTree, clr_map: NodeId) -> Self {
        let mut entries = Vec::new();
        for (name, value) in tree.attributes(clr_map) {
            if let (Some(from), Some(to)) =
                (SchemeSlot::from_name(name), SchemeSlot::from_name(value))
            {
                entries.push((from, to));
            }
        }
        Self { entries }
    }

    /// Build a mapping from explicit entries.
    pub fn from_entries(entries: Vec<(SchemeSlot, SchemeSlot)>) -> Self {
        Self { entries }
    }

    /// The slot `slot` redirects to, if this mapping has an entry for it.
    pub fn lookup(&self, slot: SchemeSlot) -> Option<SchemeSlot> {
        self.entries
            .iter()
            .find(|(from, _)| *from == slot)
            .map(|(_, to)| *to)
    }

    /// Whether the mapping carries no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
