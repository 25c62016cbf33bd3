//! Font formatting and font color, chain-resolved.
use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::chain::{
    ShapeContext, color_mappings, read_bool_attr, read_fill_color, read_font_size, resolve_first,
    run_property_nodes, theme_scheme,
};
use crate::common::{Error, RGBColor, Result};
use crate::presentation::prs::DocumentInner;
use crate::scheme::{Color, ColorMapping, SchemeSlot, resolve_color, resolve_slot};
use crate::text::types::ColorType;
use crate::xml::{NodeId, XmlTree};

/// Font size when no chain level sets one, in points.
const DEFAULT_FONT_SIZE: f64 = 18.0;

/// The `rPr` of a run, created on first write (it must precede `a:t`).
fn ensure_rpr(tree: &mut XmlTree, run: NodeId) -> NodeId {
    match tree.child(run, "rPr") {
        Some(rpr) => rpr,
        None => tree.insert_child(run, 0, "a:rPr"),
    }
}

/// The font of a text portion.
///
/// Getters resolve through the inheritance chain (run, paragraph
/// defaults, shape list style, layout and master placeholders) and
/// apply a terminal default; setters write only the run's own `rPr`.
#[derive(Clone)]
pub struct Font {
    pub(crate) doc: Rc<RefCell<DocumentInner>>,
    /// The `a:r` run element the font belongs to
    pub(crate) node: NodeId,
}

impl Font {
    /// Resolve a run-scoped value through the inheritance chain.
    fn resolve_run<T>(&self, read: impl Fn(&XmlTree, NodeId) -> Option<T>) -> Option<T> {
        let inner = self.doc.borrow();
        let tree = &inner.tree;
        let nodes = run_property_nodes(tree, self.node);
        resolve_first(nodes.iter().copied(), |&n| read(tree, n))
    }

    /// Write an attribute on the run's own `rPr`.
    fn write_rpr_attr(&self, name: &str, value: String) {
        let mut inner = self.doc.borrow_mut();
        let rpr = ensure_rpr(&mut inner.tree, self.node);
        inner.tree.set_attribute(rpr, name, value);
        inner.touch();
    }

    /// Font size in points, defaulting to 18pt.
    pub fn size(&self) -> f64 {
        self.resolve_run(read_font_size).unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Set the font size on this run, in points.
    pub fn set_size(&self, points: f64) {
        let hundredths = (points * 100.0).round() as i64;
        self.write_rpr_attr("sz", hundredths.to_string());
    }

    /// Whether the text is bold.
    pub fn bold(&self) -> bool {
        self.resolve_run(|tree, n| read_bool_attr(tree, n, "b"))
            .unwrap_or(false)
    }

    /// Set the bold flag on this run.
    pub fn set_bold(&self, bold: bool) {
        self.write_rpr_attr("b", if bold { "1" } else { "0" }.to_string());
    }

    /// Whether the text is italic.
    pub fn italic(&self) -> bool {
        self.resolve_run(|tree, n| read_bool_attr(tree, n, "i"))
            .unwrap_or(false)
    }

    /// Set the italic flag on this run.
    pub fn set_italic(&self, italic: bool) {
        self.write_rpr_attr("i", if italic { "1" } else { "0" }.to_string());
    }

    /// Whether the text is underlined (`u` attribute, any style but
    /// `none`).
    pub fn underline(&self) -> bool {
        self.resolve_run(|tree, n| tree.attribute(n, "u").map(|v| v != "none"))
            .unwrap_or(false)
    }

    /// Set single underlining on or off for this run.
    pub fn set_underline(&self, underline: bool) {
        self.write_rpr_attr("u", if underline { "sng" } else { "none" }.to_string());
    }

    /// The font color.
    pub fn color(&self) -> FontColor {
        FontColor {
            doc: Rc::clone(&self.doc),
            node: self.node,
        }
    }
}

/// The color of a text portion's font.
#[derive(Clone)]
pub struct FontColor {
    pub(crate) doc: Rc<RefCell<DocumentInner>>,
    /// The `a:r` run element the color belongs to
    pub(crate) node: NodeId,
}

impl FontColor {
    /// The first explicit fill along the inheritance chain, if any.
    fn explicit(&self, tree: &XmlTree) -> Option<Color> {
        let nodes = run_property_nodes(tree, self.node);
        resolve_first(nodes.iter().copied(), |&n| read_fill_color(tree, n))
    }

    /// The color mappings governing the run's shape.
    fn mappings(&self, tree: &XmlTree) -> SmallVec<[ColorMapping; 3]> {
        tree.ancestor(self.node, "sp")
            .and_then(|sp| ShapeContext::for_shape(tree, sp))
            .map(|ctx| color_mappings(tree, &ctx))
            .unwrap_or_default()
    }

    /// The resolved color as an uppercase `RRGGBB` string (no `#`).
    ///
    /// With no explicit fill anywhere on the chain, the terminal
    /// fallback is the context's theme text color (`tx1` through the
    /// mapping chain); a theme that does not provide one yields
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemeResolution`] when an explicit scheme
    /// reference cannot be resolved (mapping cycle, unmapped slot name,
    /// or a slot the theme does not define).
    pub fn hex(&self) -> Result<Option<String>> {
        let inner = self.doc.borrow();
        let tree = &inner.tree;
        let mappings = self.mappings(tree);
        let refs: Vec<&ColorMapping> = mappings.iter().collect();
        let scheme = theme_scheme(tree);

        match self.explicit(tree) {
            Some(color) => Ok(Some(resolve_color(color, &refs, &scheme)?.to_hex())),
            None => match resolve_slot(SchemeSlot::Text1, &refs) {
                Ok(slot) => Ok(scheme.get(slot).map(|rgb| rgb.to_hex())),
                Err(_) => Ok(None),
            },
        }
    }

    /// Whether the effective color is a literal RGB value or a theme
    /// reference. An unset color reports as a theme reference, since
    /// the terminal fallback is the theme text color.
    pub fn color_type(&self) -> ColorType {
        let inner = self.doc.borrow();
        match self.explicit(&inner.tree) {
            Some(Color::Rgb(_)) => ColorType::Rgb,
            _ => ColorType::Theme,
        }
    }

    /// Set the font color on this run.
    ///
    /// Accepts `RRGGBB`, `#RRGGBB`, or a scheme slot name such as
    /// `accent2`. The value is validated before anything is written;
    /// the write replaces the run's own fill and never touches
    /// ancestor styles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for any other input, leaving the
    /// document unchanged.
    pub fn set(&self, value: &str) -> Result<()> {
        let color = if let Some(rgb) = RGBColor::from_hex(value) {
            Color::Rgb(rgb)
        } else if let Some(slot) = SchemeSlot::from_name(value) {
            Color::Scheme(slot)
        } else {
            return Err(Error::InvalidColor(value.to_string()));
        };

        let mut inner = self.doc.borrow_mut();
        let tree = &mut inner.tree;
        let rpr = ensure_rpr(tree, self.node);
        tree.remove_children(rpr, "solidFill");
        let fill = tree.insert_child(rpr, 0, "a:solidFill");
        match color {
            Color::Rgb(rgb) => {
                let clr = tree.append_child(fill, "a:srgbClr");
                tree.set_attribute(clr, "val", rgb.to_hex());
            },
            Color::Scheme(slot) => {
                let clr = tree.append_child(fill, "a:schemeClr");
                tree.set_attribute(clr, "val", slot.name());
            },
        }
        inner.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::Presentation;
    use crate::text::portion::Portion;

    const DOC: &str = r#"<p:presentation>
        <a:theme><a:themeElements><a:clrScheme>
            <a:dk1><a:srgbClr val="000000"/></a:dk1>
            <a:lt1><a:srgbClr val="FFFFFF"/></a:lt1>
            <a:accent2><a:srgbClr val="0070C0"/></a:accent2>
        </a:clrScheme></a:themeElements></a:theme>
        <p:sldMaster id="m1">
            <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2"/>
            <p:spTree><p:sp>
                <p:nvSpPr><p:cNvPr id="2" name="Body Ph"/>
                    <p:nvPr><p:ph type="body"/></p:nvPr></p:nvSpPr>
                <p:txBody><a:bodyPr/>
                    <a:lstStyle><a:lvl1pPr><a:defRPr sz="2400" b="1"/></a:lvl1pPr></a:lstStyle>
                </p:txBody>
            </p:sp></p:spTree>
        </p:sldMaster>
        <p:sldLayout id="l1" master="m1">
            <p:clrMapOvr><a:overrideClrMapping bg1="accent2"/></p:clrMapOvr>
            <p:spTree/>
        </p:sldLayout>
        <p:sld id="s1" layout="l1"><p:spTree><p:sp>
            <p:nvSpPr><p:cNvPr id="3" name="Content 2"/>
                <p:nvPr><p:ph type="body"/></p:nvPr></p:nvSpPr>
            <p:txBody><a:bodyPr/>
                <a:p><a:r><a:t>plain</a:t></a:r></a:p>
            </p:txBody>
        </p:sp></p:spTree></p:sld>
    </p:presentation>"#;

    fn portion(prs: &Presentation) -> Portion {
        prs.slides()
            .remove(0)
            .shape("Content 2")
            .unwrap()
            .text_box()
            .unwrap()
            .paragraphs()
            .remove(0)
            .portions()
            .remove(0)
    }

    #[test]
    fn test_inherited_size_and_bold_from_master() {
        let prs = Presentation::from_xml(DOC).unwrap();
        let font = portion(&prs).font();
        assert_eq!(font.size(), 24.0);
        assert!(font.bold());
        assert!(!font.italic());
        assert!(!font.underline());
    }

    #[test]
    fn test_terminal_default_is_theme_text_color() {
        let prs = Presentation::from_xml(DOC).unwrap();
        let color = portion(&prs).font().color();
        // No fill anywhere on the chain: tx1 -> dk1 -> 000000.
        assert_eq!(color.hex().unwrap().as_deref(), Some("000000"));
        assert_eq!(color.color_type(), ColorType::Theme);
    }

    #[test]
    fn test_scheme_reference_goes_through_mapping_override() {
        let prs = Presentation::from_xml(DOC).unwrap();
        let color = portion(&prs).font().color();
        color.set("bg1").unwrap();
        // Layout override redirects bg1 to accent2.
        assert_eq!(color.hex().unwrap().as_deref(), Some("0070C0"));
        assert_eq!(color.color_type(), ColorType::Theme);
    }

    #[test]
    fn test_set_hex_writes_leaf_only() {
        let prs = Presentation::from_xml(DOC).unwrap();
        let p = portion(&prs);
        let color = p.font().color();
        color.set("#008000").unwrap();
        assert_eq!(color.hex().unwrap().as_deref(), Some("008000"));
        assert_eq!(color.color_type(), ColorType::Rgb);
        assert!(prs.is_modified());

        // Master list style untouched by the leaf write.
        let inner = p.doc.borrow();
        let tree = &inner.tree;
        let master = tree.children(tree.root(), "sldMaster").next().unwrap();
        let sp_tree = tree.child(master, "spTree").unwrap();
        let shape = tree.child(sp_tree, "sp").unwrap();
        let txbody = tree.child(shape, "txBody").unwrap();
        let lst = tree.child(txbody, "lstStyle").unwrap();
        let def_rpr = tree.child(tree.child(lst, "lvl1pPr").unwrap(), "defRPr").unwrap();
        assert!(tree.child(def_rpr, "solidFill").is_none());
    }

    #[test]
    fn test_closer_explicit_fill_wins_over_layout_placeholder() {
        let xml = r#"<p:presentation>
            <a:theme><a:themeElements><a:clrScheme>
                <a:dk1><a:srgbClr val="000000"/></a:dk1>
            </a:clrScheme></a:themeElements></a:theme>
            <p:sldMaster id="m1"><p:clrMap tx1="dk1"/><p:spTree/></p:sldMaster>
            <p:sldLayout id="l1" master="m1"><p:spTree><p:sp>
                <p:nvSpPr><p:cNvPr id="2" name="Body Ph"/>
                    <p:nvPr><p:ph type="body"/></p:nvPr></p:nvSpPr>
                <p:txBody><a:bodyPr/>
                    <a:lstStyle><a:lvl1pPr><a:defRPr>
                        <a:solidFill><a:srgbClr val="FF0000"/></a:solidFill>
                    </a:defRPr></a:lvl1pPr></a:lstStyle>
                </p:txBody>
            </p:sp></p:spTree></p:sldLayout>
            <p:sld id="s1" layout="l1"><p:spTree><p:sp>
                <p:nvSpPr><p:cNvPr id="3" name="Content 2"/>
                    <p:nvPr><p:ph type="body"/></p:nvPr></p:nvSpPr>
                <p:txBody><a:bodyPr/>
                    <a:lstStyle><a:lvl1pPr><a:defRPr>
                        <a:solidFill><a:srgbClr val="00FF00"/></a:solidFill>
                    </a:defRPr></a:lvl1pPr></a:lstStyle>
                    <a:p><a:r><a:t>x</a:t></a:r></a:p>
                </p:txBody>
            </p:sp></p:spTree></p:sld>
        </p:presentation>"#;
        let prs = Presentation::from_xml(xml).unwrap();
        let color = portion(&prs).font().color();
        // Both the shape's own list style and the layout placeholder
        // carry explicit fills; the shape level is closer and wins.
        assert_eq!(color.hex().unwrap().as_deref(), Some("00FF00"));
    }

    #[test]
    fn test_sibling_portion_keeps_inherited_color() {
        let xml = r#"<p:presentation>
            <a:theme><a:themeElements><a:clrScheme>
                <a:dk1><a:srgbClr val="000000"/></a:dk1>
            </a:clrScheme></a:themeElements></a:theme>
            <p:sldMaster id="m1">
                <p:clrMap tx1="dk1"/>
                <p:spTree/>
            </p:sldMaster>
            <p:sldLayout id="l1" master="m1"><p:spTree/></p:sldLayout>
            <p:sld id="s1" layout="l1"><p:spTree><p:sp>
                <p:nvSpPr><p:cNvPr id="2" name="Two Runs"/></p:nvSpPr>
                <p:txBody><a:bodyPr/>
                    <a:p><a:r><a:t>one</a:t></a:r><a:r><a:t>two</a:t></a:r></a:p>
                </p:txBody>
            </p:sp></p:spTree></p:sld>
        </p:presentation>"#;
        let prs = Presentation::from_xml(xml).unwrap();
        let portions = prs
            .slides()
            .remove(0)
            .shape("Two Runs")
            .unwrap()
            .text_box()
            .unwrap()
            .paragraphs()
            .remove(0)
            .portions();
        portions[0].font().color().set("FF0000").unwrap();
        assert_eq!(
            portions[0].font().color().hex().unwrap().as_deref(),
            Some("FF0000")
        );
        // The sibling still resolves the inherited theme text color.
        assert_eq!(
            portions[1].font().color().hex().unwrap().as_deref(),
            Some("000000")
        );
    }

    #[test]
    fn test_set_survives_serialize_roundtrip() {
        let prs = Presentation::from_xml(DOC).unwrap();
        portion(&prs).font().color().set("#008000").unwrap();
        let reloaded = Presentation::from_xml(&prs.to_xml()).unwrap();
        let color = portion(&reloaded).font().color();
        assert_eq!(color.hex().unwrap().as_deref(), Some("008000"));
        assert_eq!(color.color_type(), ColorType::Rgb);
    }

    #[test]
    fn test_invalid_color_rejected_before_write() {
        let prs = Presentation::from_xml(DOC).unwrap();
        let color = portion(&prs).font().color();
        let err = color.set("#00FF").unwrap_err();
        assert!(matches!(err, Error::InvalidColor(_)));
        let err = color.set("chartreuse").unwrap_err();
        assert!(matches!(err, Error::InvalidColor(_)));
        assert!(!prs.is_modified());
    }

    #[test]
    fn test_missing_theme_reports_absent_not_error() {
        let xml = r#"<p:presentation><p:sld id="s1"><p:spTree><p:sp>
            <p:nvSpPr><p:cNvPr id="2" name="Loose 1"/></p:nvSpPr>
            <p:txBody><a:bodyPr/><a:p><a:r><a:t>x</a:t></a:r></a:p></p:txBody>
        </p:sp></p:spTree></p:sld></p:presentation>"#;
        let prs = Presentation::from_xml(xml).unwrap();
        let color = prs
            .slides()
            .remove(0)
            .shape("Loose 1")
            .unwrap()
            .text_box()
            .unwrap()
            .paragraphs()
            .remove(0)
            .portions()
            .remove(0)
            .font()
            .color();
        assert_eq!(color.hex().unwrap(), None);
    }

    #[test]
    fn test_mapping_cycle_is_an_error_for_explicit_reference() {
        let xml = r#"<p:presentation>
            <a:theme><a:themeElements><a:clrScheme>
                <a:dk1><a:srgbClr val="000000"/></a:dk1>
            </a:clrScheme></a:themeElements></a:theme>
            <p:sldMaster id="m1">
                <p:clrMap bg2="tx2" tx2="bg2"/>
                <p:spTree/>
            </p:sldMaster>
            <p:sldLayout id="l1" master="m1"><p:spTree/></p:sldLayout>
            <p:sld id="s1" layout="l1"><p:spTree><p:sp>
                <p:nvSpPr><p:cNvPr id="2" name="T"/></p:nvSpPr>
                <p:txBody><a:bodyPr/><a:p><a:r>
                    <a:rPr><a:solidFill><a:schemeClr val="bg2"/></a:solidFill></a:rPr>
                    <a:t>x</a:t>
                </a:r></a:p></p:txBody>
            </p:sp></p:spTree></p:sld>
        </p:presentation>"#;
        let prs = Presentation::from_xml(xml).unwrap();
        let color = prs
            .slides()
            .remove(0)
            .shape("T")
            .unwrap()
            .text_box()
            .unwrap()
            .paragraphs()
            .remove(0)
            .portions()
            .remove(0)
            .font()
            .color();
        let err = color.hex().unwrap_err();
        assert!(matches!(err, Error::SchemeResolution(_)));
    }

    #[test]
    fn test_size_and_flag_setters_write_own_rpr() {
        let prs = Presentation::from_xml(DOC).unwrap();
        let font = portion(&prs).font();
        font.set_size(30.5);
        font.set_italic(true);
        font.set_bold(false);
        font.set_underline(true);
        assert_eq!(font.size(), 30.5);
        assert!(font.italic());
        assert!(!font.bold());
        assert!(font.underline());
    }
}
