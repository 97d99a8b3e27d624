use crate::ast::Node;
use crate::position::Position;
use thiserror::Error;

/// Recoverable misuse of the tree-building API.
///
/// Allocation failure is not represented here: running out of memory
/// while building a tree aborts the process.
#[derive(Error, Debug)]
pub enum AstError {
    #[error("cannot append to {found} at {pos}: not a statement list")]
    NotAList {
        found: &'static str,
        pos: Position,
        /// The item that was not appended, handed back to the caller.
        rejected: Box<Node>,
    },
}
