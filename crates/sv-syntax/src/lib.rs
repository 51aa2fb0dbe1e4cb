//! Token window, trivia propagation, and the arena-backed syntax tree.
//!
//! This crate is the parser *base*: a sliding token window with bounded
//! lookahead, a trivia model that keeps every source byte attached to the
//! token that follows it, the `expect`/`skipBadTokens`/`parseSeparatedList`
//! recovery primitives shared by every list-shaped grammar production, and
//! the bump-allocated tree those primitives build into.
//!
//! What is deliberately **not** here: a lexer, a preprocessor, or a concrete
//! SystemVerilog grammar. Those are external collaborators consumed through
//! [`window::TokenSource`] and the generic [`kind::Kind`] discriminator; a
//! grammar crate built on top of this one supplies its own `SyntaxKind`
//! implementation and wires a real lexer into [`window::TokenWindow`].

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]

pub mod arena;
pub mod kind;
pub mod list;
pub mod pools;
pub mod token;
pub mod window;

pub use arena::{Arena, SyntaxNode, TokenOrSyntax};
pub use kind::{DemoKind, Kind};
pub use list::{parse_separated_list, skip_bad_tokens, RecoveryControl};
pub use pools::{PooledVec, ScratchPools};
pub use token::{Token, Trivia};
pub use window::{TokenSource, TokenWindow};
