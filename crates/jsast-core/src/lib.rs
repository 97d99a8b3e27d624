//! jsast-core: the JavaScript syntax tree.
//!
//! # Design
//!
//! 1. **One sum type for every construct**
//!    - [`NodeKind`] carries a payload per kind; every walk over the tree is
//!      an exhaustive `match`.
//!
//! 2. **Single ownership**
//!    - A node owns its children and its text. There is no sharing, so a
//!      tree is released exactly once, either by dropping it or through
//!      [`teardown`], which does the same walk and counts what it frees.
//!
//! 3. **Explicit positions**
//!    - The [`Builder`] carries the scan cursor; the grammar moves it with
//!      [`Builder::seek`] and every node is stamped with it on creation.
//!
//! # Example
//!
//! ```
//! use jsast_core::{print_tree, Builder};
//!
//! let b = Builder::new();
//! let decl = b.var_declaration("x", Some(b.number_literal("5")));
//! assert_eq!(
//!     print_tree(Some(&decl)),
//!     "VariableDeclaration(var) name=x\n  Initializer:\n    Literal (number) 5\n"
//! );
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]

mod ast;
mod builder;
mod error;
mod list;
mod position;
mod printer;
mod teardown;

pub use ast::{DeclKind, Literal, Node, NodeKind};
pub use builder::Builder;
pub use error::AstError;
pub use list::{NodeList, INITIAL_CAPACITY};
pub use position::Position;
pub use printer::{print_tree, TreePrinter};
pub use teardown::{teardown, Released};
