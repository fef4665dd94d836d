//! Workspace scope resolution.
//!
//! One root: its path. Several roots: their names, sorted, joined by
//! [`SCOPE_SEPARATOR`]. No roots: no scope.

use crate::types::scope::{WorkspaceRoot, WorkspaceScope, SCOPE_SEPARATOR};

pub fn resolve_scope(roots: &[WorkspaceRoot]) -> Option<WorkspaceScope> {
    match roots {
        [] => None,
        [single] => Some(WorkspaceScope::new(single.path.clone())),
        many => {
            let mut names: Vec<&str> = many.iter().map(|r| r.name.as_str()).collect();
            names.sort_unstable();
            Some(WorkspaceScope::new(names.join(SCOPE_SEPARATOR)))
        }
    }
}
