//! Scheme color resolution.
//!
//! Turns a [`Color`] into a displayable RGB value. Literal colors pass
//! through; scheme references walk the color-mapping chain (most
//! specific first: slide, layout, master) until no further redirection
//! applies, then look the final slot up in the theme's color scheme.
use crate::common::{Error, Result, RGBColor};
use crate::scheme::types::{Color, ColorMapping, ColorScheme, SchemeSlot};

/// Maximum number of mapping substitutions applied to one slot.
///
/// Well-formed documents need at most one (`bg1` → `lt1`); a second
/// hop tolerates a remapped canonical slot. Needing more means the
/// mappings form a cycle and resolution fails instead of looping.
pub const MAX_MAPPING_HOPS: usize = 2;

/// Apply the mapping chain to a slot until it stops moving.
///
/// `mappings` is ordered most specific first; for each substitution the
/// first mapping carrying an entry for the current slot wins. An
/// identity entry (`accent1="accent1"`, standard in real documents)
/// terminates the walk. Exceeding [`MAX_MAPPING_HOPS`], or ending on a
/// mapped name that no mapping redirects, is a resolution error.
pub fn resolve_slot(slot: SchemeSlot, mappings: &[&ColorMapping]) -> Result<SchemeSlot> {
    let mut current = slot;
    let mut hops = 0;
    loop {
        let next = mappings.iter().find_map(|m| m.lookup(current));
        match next {
            Some(next) if next != current => {
                hops += 1;
                if hops > MAX_MAPPING_HOPS {
                    return Err(Error::SchemeResolution(format!(
                        "color mapping for '{}' exceeds {} hops (mapping cycle)",
                        slot.name(),
                        MAX_MAPPING_HOPS
                    )));
                }
                current = next;
            },
            _ => break,
        }
    }

    if !current.is_canonical() {
        return Err(Error::SchemeResolution(format!(
            "slot '{}' is not mapped to a theme color",
            current.name()
        )));
    }
    Ok(current)
}

/// Resolve a color to its final RGB value.
///
/// # Errors
///
/// Returns [`Error::SchemeResolution`] when a scheme reference cannot
/// be resolved: a mapping cycle, an unmapped non-canonical slot, or a
/// final slot the theme does not define. A malformed scheme reference
/// is never silently replaced with a default color.
///
/// # Examples
///
/// ```rust
/// use quince::common::RGBColor;
/// use quince::scheme::{resolve_color, Color, ColorMapping, ColorScheme, SchemeSlot};
///
/// let mut scheme = ColorScheme::default();
/// scheme.set(SchemeSlot::Accent2, RGBColor::from_hex("0070C0").unwrap());
/// let mapping = ColorMapping::from_entries(vec![(SchemeSlot::Background1, SchemeSlot::Accent2)]);
///
/// let rgb = resolve_color(Color::Scheme(SchemeSlot::Background1), &[&mapping], &scheme).unwrap();
/// assert_eq!(rgb.to_hex(), "0070C0");
/// ```
pub fn resolve_color(
    color: Color,
    mappings: &[&ColorMapping],
    scheme: &ColorScheme,
) -> Result<RGBColor> {
    match color {
        Color::Rgb(rgb) => Ok(rgb),
        Color::Scheme(slot) => {
            let canonical = resolve_slot(slot, mappings)?;
            scheme.get(canonical).ok_or_else(|| {
                Error::SchemeResolution(format!(
                    "theme color scheme does not define slot '{}'",
                    canonical.name()
                ))
            })
        },
    }
}
