//! Core type definitions for diagram declaration
//!
//! This module contains the vocabulary shared by every diagram: node kinds,
//! edge styles and attributes, layout direction and output format.

use std::fmt;

/// Kind of glyph a node is drawn with
///
/// Each kind maps to a Graphviz shape and fill color so that the same role
/// reads the same way across all diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum NodeKind {
    /// An end user or client device
    Client,
    /// A React page or component
    #[default]
    React,
    /// TypeScript module (contexts, hooks, services)
    TypeScript,
    /// Identity provider
    Identity,
    /// PostgreSQL database
    Postgres,
    /// Generic server or hosted API
    Server,
    /// Access-control layer
    Firewall,
    /// Object or file storage
    Storage,
    /// SQL table or SQL client
    Sql,
}

/// Graphviz presentation of a [`NodeKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeGlyph {
    pub shape: &'static str,
    pub fill: &'static str,
    pub font_color: &'static str,
}

impl NodeKind {
    /// Shape and colors used when emitting this kind
    pub fn glyph(&self) -> NodeGlyph {
        let (shape, fill, font_color) = match self {
            NodeKind::Client => ("oval", "#DFE6E9", "#2D3436"),
            NodeKind::React => ("box", "#D6F3FB", "#2D3436"),
            NodeKind::TypeScript => ("box", "#D4E4F7", "#2D3436"),
            NodeKind::Identity => ("octagon", "#FBE3D6", "#2D3436"),
            NodeKind::Postgres => ("cylinder", "#CFE0F1", "#2D3436"),
            NodeKind::Server => ("box3d", "#ECEFF1", "#2D3436"),
            NodeKind::Firewall => ("hexagon", "#F9D6D5", "#2D3436"),
            NodeKind::Storage => ("folder", "#FDF2D0", "#2D3436"),
            NodeKind::Sql => ("cylinder", "#E3F1DF", "#2D3436"),
        };
        NodeGlyph {
            shape,
            fill,
            font_color,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Client => write!(f, "client"),
            NodeKind::React => write!(f, "react"),
            NodeKind::TypeScript => write!(f, "typescript"),
            NodeKind::Identity => write!(f, "identity"),
            NodeKind::Postgres => write!(f, "postgres"),
            NodeKind::Server => write!(f, "server"),
            NodeKind::Firewall => write!(f, "firewall"),
            NodeKind::Storage => write!(f, "storage"),
            NodeKind::Sql => write!(f, "sql"),
        }
    }
}

/// Line style of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl EdgeStyle {
    /// Graphviz `style` value, or `None` for the renderer default
    pub fn dot_style(&self) -> Option<&'static str> {
        match self {
            EdgeStyle::Solid => None,
            EdgeStyle::Dashed => Some("dashed"),
            EdgeStyle::Dotted => Some("dotted"),
            EdgeStyle::Bold => Some("bold"),
        }
    }
}

impl fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeStyle::Solid => write!(f, "solid"),
            EdgeStyle::Dashed => write!(f, "dashed"),
            EdgeStyle::Dotted => write!(f, "dotted"),
            EdgeStyle::Bold => write!(f, "bold"),
        }
    }
}

/// Presentation attributes for a declared edge
///
/// ```rust
/// use archviz::core::{Edge, EdgeStyle};
///
/// let push = Edge::labeled("Push Updates").style(EdgeStyle::Dashed);
/// assert_eq!(push.label.as_deref(), Some("Push Updates"));
/// assert!(push.directed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Optional text drawn next to the edge
    pub label: Option<String>,
    /// Line style
    pub style: EdgeStyle,
    /// Whether an arrowhead is drawn at the target
    pub directed: bool,
}

impl Default for Edge {
    fn default() -> Self {
        Self {
            label: None,
            style: EdgeStyle::Solid,
            directed: true,
        }
    }
}

impl Edge {
    /// A plain directed edge
    pub fn new() -> Self {
        Self::default()
    }

    /// A directed edge with a label
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Set the line style
    pub fn style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    /// Drop the arrowhead
    pub fn undirected(mut self) -> Self {
        self.directed = false;
        self
    }
}

/// Layout direction for a diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Top to bottom (TB)
    #[default]
    TopBottom,
    /// Left to right (LR)
    LeftRight,
    /// Bottom to top (BT)
    BottomTop,
    /// Right to left (RL)
    RightLeft,
}

impl Direction {
    /// Graphviz `rankdir` value
    pub fn rankdir(&self) -> &'static str {
        match self {
            Direction::TopBottom => "TB",
            Direction::LeftRight => "LR",
            Direction::BottomTop => "BT",
            Direction::RightLeft => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rankdir())
    }
}

/// Output file format requested from the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    /// Laid-out DOT source, useful for debugging layouts
    Dot,
}

impl OutputFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Ordered key/value attribute list
///
/// Keeps insertion order so emitted DOT is stable; setting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay every entry of `other` onto `self`
    pub fn merge(&mut self, other: &Attributes) -> &mut Self {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (key, value) in iter {
            attrs.set(key, value);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_rankdir() {
        assert_eq!(Direction::TopBottom.rankdir(), "TB");
        assert_eq!(Direction::LeftRight.to_string(), "LR");
        assert_eq!(Direction::BottomTop.rankdir(), "BT");
        assert_eq!(Direction::RightLeft.rankdir(), "RL");
    }

    #[test]
    fn test_output_format() {
        assert_eq!(OutputFormat::default(), OutputFormat::Png);
        assert_eq!(OutputFormat::Svg.extension(), "svg");
        assert_eq!(OutputFormat::Dot.to_string(), "dot");
    }

    #[test]
    fn test_edge_builders() {
        let edge = Edge::new();
        assert!(edge.label.is_none());
        assert!(edge.directed);
        assert_eq!(edge.style, EdgeStyle::Solid);

        let link = Edge::labeled("sync").style(EdgeStyle::Dotted).undirected();
        assert_eq!(link.label.as_deref(), Some("sync"));
        assert_eq!(link.style, EdgeStyle::Dotted);
        assert!(!link.directed);
    }

    #[test]
    fn test_edge_style_dot_value() {
        assert_eq!(EdgeStyle::Solid.dot_style(), None);
        assert_eq!(EdgeStyle::Dashed.dot_style(), Some("dashed"));
        assert_eq!(EdgeStyle::Bold.to_string(), "bold");
    }

    #[test]
    fn test_node_kind_glyphs_are_distinct_per_role() {
        assert_eq!(NodeKind::Postgres.glyph().shape, "cylinder");
        assert_eq!(NodeKind::Client.glyph().shape, "oval");
        assert_ne!(NodeKind::Sql.glyph().fill, NodeKind::Postgres.glyph().fill);
    }

    #[test]
    fn test_attributes_replace_in_place() {
        let mut attrs: Attributes = [("fontsize", "16"), ("bgcolor", "white")]
            .into_iter()
            .collect();
        attrs.set("fontsize", "12");
        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["fontsize", "bgcolor"]);
        assert_eq!(attrs.get("fontsize"), Some("12"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_attributes_merge() {
        let mut base: Attributes = [("pad", "2.0")].into_iter().collect();
        let overlay: Attributes = [("pad", "0.5"), ("bgcolor", "white")]
            .into_iter()
            .collect();
        base.merge(&overlay);
        assert_eq!(base.get("pad"), Some("0.5"));
        assert_eq!(base.get("bgcolor"), Some("white"));
    }
}
