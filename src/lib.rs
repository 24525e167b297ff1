//! Admin console for elastic configuration and cluster documents held on a
//! remote configuration service.

pub mod compare;
pub mod editor;
pub mod model;
pub mod remote;
pub mod selection;
pub mod store;
pub mod tui;
pub mod tui_shell;
pub mod validate;
