pub mod diagnostic;
pub mod node;
pub mod span;
pub mod token;

pub use diagnostic::{sort_diagnostics, Diagnostic, DiagnosticCode, Params};
pub use node::{InvalidSection, Key, MapNode, Node, NodeKind, UndefinedKind};
pub use span::Span;
pub use token::{CommentKind, TerminalSymbol, Token};
