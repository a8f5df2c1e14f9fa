use alloc::boxed::Box;

use crate::Reflect;

/// Iterator over the entries of a [`Map`].
pub type MapIter<'a> = Box<dyn Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)> + 'a>;

/// A reflected key-value container.
///
/// [`iter`](Map::iter) yields entries in the container's own iteration
/// order (insertion order for `IndexMap`, key order for `BTreeMap`), which
/// becomes the order of the encoded mapping.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> MapIter<'_>;
}
