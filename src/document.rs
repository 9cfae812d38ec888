//! SVG document model: path elements plus pass-through shapes.
//!
//! Parsing keeps every `<path>` (at any depth, in document order) and
//! the basic presentational shapes listed in [`PASS_THROUGH`]. Group
//! transforms, text and styling blocks are not modelled.
//!
//! Attribute values are held decoded: entity and character references
//! are resolved on parse and escaped once more by the writer. Prefixed
//! namespace declarations (`xmlns:xlink`, `xmlns:inkscape`, ...) found
//! anywhere in the input are carried onto the output root.

use std::collections::BTreeMap;
use std::str::FromStr;

use kurbo::Point;
use svg::node::element::tag::Type;
use svg::parser::Event;
use svg::Node as _;
use tracing::debug;

use crate::codec::{self, PathAccess};
use crate::config::RecenterConfig;
use crate::error::{RecenterError, Result};
use crate::segment::Outline;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Non-path elements copied to the output unchanged.
pub const PASS_THROUGH: &[&str] = &[
    "rect", "circle", "ellipse", "line", "polyline", "polygon", "image", "use",
];

/// A `<path>` element: its path data and all other attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathElement {
    /// Raw `d` attribute.
    pub data: String,
    pub attributes: BTreeMap<String, String>,
}

impl PathAccess for PathElement {
    fn path_data(&self) -> Result<Outline> {
        codec::decode(&self.data)
    }

    fn set_path_data(&mut self, outline: &Outline) {
        self.data = codec::to_path_data(outline);
    }
}

/// Any other element, by name and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    /// Unfilled black circle, used as the reference marker.
    pub fn marker(center: Point, radius: f64) -> Self {
        let attributes = [
            ("cx", center.x.to_string()),
            ("cy", center.y.to_string()),
            ("r", radius.to_string()),
            ("fill", "none".to_string()),
            ("stroke", "black".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self {
            name: "circle".to_string(),
            attributes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Path(PathElement),
    Element(Element),
}

impl Node {
    /// Path capability of this node, if it carries a path.
    pub fn path_access(&self) -> Option<&dyn PathAccess> {
        match self {
            Node::Path(path) => Some(path),
            Node::Element(_) => None,
        }
    }

    pub fn path_access_mut(&mut self) -> Option<&mut dyn PathAccess> {
        match self {
            Node::Path(path) => Some(path),
            Node::Element(_) => None,
        }
    }
}

/// Ordered list of document nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
    /// Namespace prefix → URI, from `xmlns:*` declarations.
    namespaces: BTreeMap<String, String>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            namespaces: BTreeMap::new(),
        }
    }

    /// Parse SVG markup. Fails if the text cannot be tokenized or has no
    /// `<svg>` root element.
    pub fn parse(text: &str) -> Result<Self> {
        let parser =
            svg::read(text).map_err(|e| RecenterError::MalformedDocument(e.to_string()))?;

        let mut has_root = false;
        let mut nodes = Vec::new();
        let mut namespaces = BTreeMap::new();
        for event in parser {
            let (name, mut attributes) = match event {
                Event::Error(e) => return Err(RecenterError::MalformedDocument(e.to_string())),
                Event::Tag(name, Type::Start | Type::Empty, attributes) => {
                    (name, collect_attributes(attributes))
                }
                _ => continue,
            };
            for (attr, uri) in &attributes {
                if let Some(prefix) = attr.strip_prefix("xmlns:") {
                    namespaces
                        .entry(prefix.to_string())
                        .or_insert_with(|| uri.clone());
                }
            }
            match name {
                "svg" => has_root = true,
                "path" => {
                    let data = attributes.remove("d").unwrap_or_default();
                    nodes.push(Node::Path(PathElement { data, attributes }));
                }
                name if PASS_THROUGH.contains(&name) => {
                    nodes.push(Node::Element(Element {
                        name: name.to_string(),
                        attributes,
                    }));
                }
                _ => {}
            }
        }

        if !has_root {
            return Err(RecenterError::MalformedDocument(
                "missing <svg> root element".to_string(),
            ));
        }
        Ok(Self { nodes, namespaces })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Declared namespace prefixes and their URIs.
    pub fn namespaces(&self) -> &BTreeMap<String, String> {
        &self.namespaces
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Nodes that carry a path, in document order.
    pub fn paths(&self) -> impl Iterator<Item = &dyn PathAccess> + '_ {
        self.nodes.iter().filter_map(Node::path_access)
    }

    /// Serialize onto a canvas of the configured size.
    pub fn to_svg(&self, config: &RecenterConfig) -> String {
        let (w, h) = (config.canvas_width, config.canvas_height);
        let mut doc = svg::Document::new()
            .set("xmlns", SVG_NAMESPACE)
            .set("width", w)
            .set("height", h)
            .set("viewBox", format!("0 0 {w} {h}"))
            .set("style", "border: 1px solid black;");
        for (prefix, uri) in &self.namespaces {
            doc = doc.set(format!("xmlns:{prefix}"), writable(uri));
        }

        for node in &self.nodes {
            match node {
                Node::Path(path) => {
                    let mut el = svg::node::element::Path::new();
                    self.assign_attributes(&mut el, &path.attributes);
                    doc = doc.add(el.set("d", writable(&path.data)));
                }
                Node::Element(element) => {
                    let mut el = svg::node::element::Element::new(element.name.as_str());
                    self.assign_attributes(&mut el, &element.attributes);
                    doc = doc.add(el);
                }
            }
        }

        doc.to_string()
    }

    /// Copy attributes onto an output element. Attributes whose prefix is
    /// bound nowhere are dropped so the output stays namespace-well-formed.
    fn assign_attributes<N: svg::Node>(&self, el: &mut N, attributes: &BTreeMap<String, String>) {
        for (name, value) in attributes {
            let bound = match name.split_once(':') {
                None | Some(("xml" | "xmlns", _)) => true,
                Some((prefix, _)) => {
                    self.namespaces.contains_key(prefix)
                        || attributes.contains_key(&format!("xmlns:{prefix}"))
                }
            };
            if !bound {
                debug!(attribute = %name, "dropping attribute with undeclared prefix");
                continue;
            }
            el.assign(name.as_str(), writable(value));
        }
    }
}

impl FromStr for Document {
    type Err = RecenterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn collect_attributes(attributes: svg::node::Attributes) -> BTreeMap<String, String> {
    attributes
        .into_iter()
        .map(|(name, value)| (name, unescape(&value)))
        .collect()
}

/// Resolve the predefined XML entities and numeric character references
/// in a raw attribute value. Anything else after `&` is kept verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .and_then(|end| Some((decode_reference(&rest[1..end])?, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// The writer escapes `&`, `<` and `>` but always quotes with `"`, so a
/// literal double quote is written as a single one.
fn writable(value: &str) -> String {
    value.replace('"', "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAWING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <rect x="1" y="2" width="3" height="4" fill="red"/>
  <g fill="blue">
    <path id="a" d="M0 0 L10 0 L10 10 Z" stroke="black"/>
  </g>
  <path id="b" d="m20 20 h5 v5 z"></path>
  <text x="0" y="0">label</text>
</svg>"#;

    #[test]
    fn parse_collects_paths_and_shapes_in_order() {
        let doc = Document::parse(DRAWING).unwrap();
        assert_eq!(doc.nodes().len(), 3);
        assert!(matches!(&doc.nodes()[0], Node::Element(e) if e.name == "rect"));
        let Node::Path(a) = &doc.nodes()[1] else {
            panic!("expected nested path, got {:?}", doc.nodes()[1]);
        };
        assert_eq!(a.data, "M0 0 L10 0 L10 10 Z");
        assert_eq!(a.attributes.get("id").map(String::as_str), Some("a"));
        assert!(!a.attributes.contains_key("d"));
        assert_eq!(doc.paths().count(), 2);
    }

    #[test]
    fn path_access_decodes_relative_data() {
        let doc = Document::parse(DRAWING).unwrap();
        let outline = doc.paths().nth(1).unwrap().path_data().unwrap();
        let points: Vec<Point> = outline.points().collect();
        assert_eq!(
            points,
            vec![
                Point::new(20.0, 20.0),
                Point::new(25.0, 20.0),
                Point::new(25.0, 25.0),
            ]
        );
    }

    #[test]
    fn missing_root_is_rejected() {
        let err = Document::parse(r#"<path d="M0 0 L1 1"/>"#).unwrap_err();
        assert!(matches!(err, RecenterError::MalformedDocument(_)));
    }

    #[test]
    fn document_without_paths_parses_empty() {
        let doc: Document = "<svg><circle cx=\"1\" cy=\"1\" r=\"1\"/></svg>".parse().unwrap();
        assert_eq!(doc.paths().count(), 0);
        assert_eq!(doc.nodes().len(), 1);
    }

    #[test]
    fn serializes_on_the_configured_canvas() {
        let mut doc = Document::parse(DRAWING).unwrap();
        doc.push(Node::Element(Element::marker(Point::new(60.0, 60.0), 30.0)));
        let text = doc.to_svg(&RecenterConfig::default());

        assert!(text.contains(r#"width="120""#));
        assert!(text.contains(r#"height="120""#));
        assert!(text.contains(r#"viewBox="0 0 120 120""#));
        assert!(text.contains(r#"d="M0 0 L10 0 L10 10 Z""#));
        assert!(text.contains(r#"stroke="black""#));
        assert!(text.contains(r#"r="30""#));

        // Output parses back to the same nodes.
        let reparsed = Document::parse(&text).unwrap();
        assert_eq!(reparsed.nodes(), doc.nodes());
    }

    #[test]
    fn entities_are_decoded_once_and_escaped_once() {
        let text = r#"<svg><rect data-x="a &amp; b" title="&lt;&#65;&#x42;&quot;" note="R&D; &nbsp;"/></svg>"#;
        let doc = Document::parse(text).unwrap();
        let Node::Element(rect) = &doc.nodes()[0] else {
            panic!("expected rect");
        };
        assert_eq!(rect.attributes["data-x"], "a & b");
        assert_eq!(rect.attributes["title"], "<AB\"");
        assert_eq!(rect.attributes["note"], "R&D; &nbsp;");

        let once = doc.to_svg(&RecenterConfig::default());
        assert!(once.contains(r#"data-x="a &amp; b""#));
        let twice = Document::parse(&once)
            .unwrap()
            .to_svg(&RecenterConfig::default());
        assert_eq!(twice, once);
    }

    #[test]
    fn prefixed_attributes_keep_their_namespace() {
        let text = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
  <g xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
    <path d="M0 0 L1 0 L0 1 Z" inkscape:label="L"/>
  </g>
  <use xlink:href="#p"/>
</svg>"##;
        let doc = Document::parse(text).unwrap();
        assert_eq!(doc.namespaces().len(), 2);

        let out = doc.to_svg(&RecenterConfig::default());
        assert!(out.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
        assert!(out.contains(r#"xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape""#));
        assert!(out.contains(r##"xlink:href="#p""##));
        assert!(out.contains(r#"inkscape:label="L""#));
    }

    #[test]
    fn undeclared_prefixes_are_dropped() {
        let text = r##"<svg><use xlink:href="#p" x="1"/></svg>"##;
        let out = Document::parse(text)
            .unwrap()
            .to_svg(&RecenterConfig::default());
        assert!(!out.contains("xlink"));
        assert!(out.contains(r#"x="1""#));
    }
}
