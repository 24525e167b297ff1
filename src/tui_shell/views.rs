mod tree;

pub(in crate::tui_shell) use self::tree::{TreeRow, TreeView};
