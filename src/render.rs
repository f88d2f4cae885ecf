use std::fmt;

use crate::llrb::Llrb;
use crate::pool::NodeId;

/// Draw the tree sideways, larger keys on top, one key per line:
///
/// ```text
/// llrb shape
/// │   ┌── 3
/// └── 2
///     └── 1
/// ```
impl<K, V> fmt::Display for Llrb<K, V>
where
    K: Ord + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "llrb {}", self.id())?;
        match self.root_id() {
            Some(root) => self.render(f, root, &mut String::new(), true),
            None => Ok(()),
        }
    }
}

impl<K, V> Llrb<K, V>
where
    K: Ord + fmt::Display,
{
    // `tail` is set when node hangs below its parent.
    fn render(
        &self,
        f: &mut fmt::Formatter,
        node: NodeId,
        prefix: &mut String,
        tail: bool,
    ) -> fmt::Result {
        let nref = self.node(node);
        let n = prefix.len();

        if let Some(right) = nref.right {
            prefix.push_str(if tail { "│   " } else { "    " });
            self.render(f, right, prefix, false)?;
            prefix.truncate(n);
        }

        let connector = if tail { "└── " } else { "┌── " };
        writeln!(f, "{}{}{}", prefix, connector, nref.key)?;

        if let Some(left) = nref.left {
            prefix.push_str(if tail { "    " } else { "│   " });
            self.render(f, left, prefix, true)?;
            prefix.truncate(n);
        }
        Ok(())
    }
}
