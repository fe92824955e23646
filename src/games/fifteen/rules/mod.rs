//! Game rules for sum-to-15.
//!
//! Pure functions over a board and a rule set. Rules are kept apart from
//! board storage so the session, the selector and the invariants can all
//! share them.

pub mod line;
pub mod win;

pub use line::{LineRule, RuleSet, RuleSetError, STANDARD_LINES};
pub use win::{TerminalStatus, evaluate};
