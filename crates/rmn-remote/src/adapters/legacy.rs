//! # Legacy Bless Oracle
//!
//! In-memory [`LegacyBlessOracle`] holding the set of roots blessed under the
//! predecessor model. Used while migrating lanes off the blessing flow.

use crate::domain::entities::TaggedRoot;
use crate::ports::outbound::LegacyBlessOracle;
use parking_lot::RwLock;
use std::collections::HashSet;

/// Static set of blessed tagged roots.
#[derive(Debug, Default)]
pub struct StaticBlessOracle {
    blessed: RwLock<HashSet<TaggedRoot>>,
}

impl StaticBlessOracle {
    /// Create an oracle with nothing blessed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an oracle pre-loaded with `roots`.
    pub fn with_blessed(roots: impl IntoIterator<Item = TaggedRoot>) -> Self {
        Self {
            blessed: RwLock::new(roots.into_iter().collect()),
        }
    }

    /// Mark `root` as blessed. Returns false if it already was.
    pub fn bless(&self, root: TaggedRoot) -> bool {
        self.blessed.write().insert(root)
    }

    /// Remove a blessing. Returns false if `root` was not blessed.
    pub fn revoke(&self, root: &TaggedRoot) -> bool {
        self.blessed.write().remove(root)
    }
}

impl LegacyBlessOracle for StaticBlessOracle {
    fn is_blessed(&self, tagged_root: &TaggedRoot) -> bool {
        self.blessed.read().contains(tagged_root)
    }
}
