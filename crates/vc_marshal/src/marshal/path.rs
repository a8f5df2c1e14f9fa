use alloc::collections::VecDeque;
use alloc::string::String;
use core::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// The type the path starts from.
    Type(&'static str),
    /// A named field, by its declared name.
    Field(&'static str),
    /// An enum variant, by its tag.
    Variant(&'static str),
    /// A position in a tuple or sequence.
    Index(usize),
    /// A mapping entry, by the display form of its key.
    Key(String),
}

/// The location of a value inside a record, from the outermost type down.
///
/// Displayed as `User.name::FirstMiddleLast.middle[0]`.
///
/// ```
/// use vc_marshal::marshal::{FieldPath, PathSegment};
///
/// let mut path = FieldPath::new();
/// path.push_front(PathSegment::Index(0));
/// path.push_front(PathSegment::Field("middle"));
/// path.push_front(PathSegment::Variant("FirstMiddleLast"));
/// path.push_front(PathSegment::Field("name"));
/// path.push_front(PathSegment::Type("User"));
///
/// assert_eq!(path.to_string(), "User.name::FirstMiddleLast.middle[0]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: VecDeque<PathSegment>,
}

impl FieldPath {
    #[inline]
    pub const fn new() -> Self {
        Self {
            segments: VecDeque::new(),
        }
    }

    /// Prepends a segment.
    ///
    /// Errors are raised at the innermost value and gain their outer
    /// segments while propagating, so paths grow at the front.
    #[inline]
    pub fn push_front(&mut self, segment: PathSegment) {
        self.segments.push_front(segment);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Type(name) => f.write_str(name)?,
                PathSegment::Field(name) if index == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Variant(tag) => write!(f, "::{tag}")?,
                PathSegment::Index(position) => write!(f, "[{position}]")?,
                PathSegment::Key(key) => write!(f, "[{key}]")?,
            }
        }
        Ok(())
    }
}
