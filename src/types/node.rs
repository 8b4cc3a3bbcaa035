use num_bigint::BigInt;
use smol_str::SmolStr;

use super::Span;

/// A property key. Keys are always string literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub span: Span,
    pub value: SmolStr,
}

impl Key {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// Why a value position holds no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UndefinedKind {
    /// Nothing was written where a value was expected.
    Missing,
    /// A value token that is neither a boolean nor an integer.
    Unrecognized,
    /// A token that already carried lexical errors, such as a malformed string.
    Erroneous,
}

/// An object section that did not form a pair: its key is not a string literal, or no `:`
/// followed it.
///
/// These sections take no part in key lookup. They are kept so that editors can still show
/// and navigate what was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSection {
    pub key: Node,
    /// `None` when no `:` followed the key.
    pub value: Option<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapNode {
    /// Pairs in source order. Duplicate keys are retained.
    pub pairs: Vec<(Key, Node)>,
    /// Sections that did not form a pair, in source order.
    pub invalid: Vec<InvalidSection>,
}

impl MapNode {
    /// Number of sections, counting those that did not form a pair.
    pub fn len(&self) -> usize {
        self.pairs.len() + self.invalid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.invalid.is_empty()
    }

    /// Looks up a key, returning the first occurrence when the key is duplicated.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.pairs
            .iter()
            .find(|(k, _)| k.value == key)
            .map(|(_, value)| value)
    }

    /// Pairs with the later occurrences of duplicated keys left out.
    pub fn first_occurrences(&self) -> impl Iterator<Item = &(Key, Node)> {
        self.pairs
            .iter()
            .enumerate()
            .filter(|(idx, (key, _))| {
                !self.pairs[..*idx]
                    .iter()
                    .any(|(earlier, _)| earlier.value == key.value)
            })
            .map(|(_, pair)| pair)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(key, _)| key.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Map(MapNode),
    List(Vec<Node>),
    Boolean(bool),
    Integer(BigInt),
    String(String),
    Undefined(UndefinedKind),
}

/// A syntax tree node with the span of the tokens it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub span: Span,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { span, kind }
    }

    pub fn missing(offset: usize) -> Self {
        Self::new(
            NodeKind::Undefined(UndefinedKind::Missing),
            Span::empty_at(offset),
        )
    }

    pub fn kind_desc(&self) -> &'static str {
        match &self.kind {
            NodeKind::Map(_) => "object",
            NodeKind::List(_) => "array",
            NodeKind::Boolean(_) => "boolean",
            NodeKind::Integer(_) => "integer",
            NodeKind::String(_) => "string",
            NodeKind::Undefined(_) => "undefined",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self.kind, NodeKind::Undefined(_))
    }

    pub fn as_map(&self) -> Option<&MapNode> {
        match &self.kind {
            NodeKind::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            NodeKind::Boolean(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match &self.kind {
            NodeKind::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::String(value) => Some(value),
            _ => None,
        }
    }

    /// Structural equality that ignores spans.
    pub fn same_shape(&self, other: &Node) -> bool {
        match (&self.kind, &other.kind) {
            (NodeKind::Map(a), NodeKind::Map(b)) => {
                a.pairs.len() == b.pairs.len()
                    && a.invalid.len() == b.invalid.len()
                    && a.invalid.iter().zip(&b.invalid).all(|(x, y)| {
                        x.key.same_shape(&y.key)
                            && match (&x.value, &y.value) {
                                (Some(vx), Some(vy)) => vx.same_shape(vy),
                                (None, None) => true,
                                _ => false,
                            }
                    })
                    && a.pairs.iter().zip(&b.pairs).all(|((ka, va), (kb, vb))| {
                        ka.value == kb.value && va.same_shape(vb)
                    })
            }
            (NodeKind::List(a), NodeKind::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            (a, b) => a == b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str, start: usize) -> Key {
        Key {
            span: Span::new(start, value.len() + 2),
            value: value.into(),
        }
    }

    fn int(value: i64, start: usize) -> Node {
        Node::new(NodeKind::Integer(BigInt::from(value)), Span::new(start, 1))
    }

    #[rstest::rstest]
    fn test_get_returns_first_occurrence() {
        let map = MapNode {
            pairs: vec![
                (key("a", 1), int(1, 5)),
                (key("b", 7), int(2, 11)),
                (key("a", 13), int(3, 17)),
            ],
            invalid: Vec::new(),
        };
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("a").and_then(Node::as_integer), Some(&BigInt::from(1)));
        let firsts: Vec<_> = map.first_occurrences().map(|(k, _)| k.span.start).collect();
        assert_eq!(firsts, vec![1, 7]);
    }

    #[rstest::rstest]
    fn test_same_shape_ignores_spans() {
        let a = Node::new(NodeKind::List(vec![int(1, 1), int(2, 3)]), Span::new(0, 5));
        let b = Node::new(NodeKind::List(vec![int(1, 2), int(2, 6)]), Span::new(0, 9));
        assert!(a.same_shape(&b));
        assert_ne!(a, b);
    }

    #[rstest::rstest]
    fn test_missing_placeholder_is_zero_length() {
        let node = Node::missing(4);
        assert!(node.is_undefined());
        assert_eq!(node.span, Span::empty_at(4));
        assert_eq!(node.kind_desc(), "undefined");
    }
}
