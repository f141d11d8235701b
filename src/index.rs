use faststr::FastStr;

use crate::{JsonContainerTrait, LazyValue};

mod private {
    pub trait Sealed {}

    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl Sealed for faststr::FastStr {}
    impl<T: ?Sized + Sealed> Sealed for &T {}
}

/// An indexing trait for JSON. `usize` indexes into an array, string types index into an object.
pub trait Index: private::Sealed {
    /// Return None if the index is not already in the array or object.
    #[doc(hidden)]
    fn index_into<'v>(&self, v: &'v LazyValue) -> Option<&'v LazyValue>;
}

impl Index for usize {
    fn index_into<'v>(&self, v: &'v LazyValue) -> Option<&'v LazyValue> {
        v.as_array()?.get(*self)
    }
}

macro_rules! impl_str_index {
    ($($t:ty),*) => {
        $(
            impl Index for $t {
                #[inline]
                fn index_into<'v>(&self, v: &'v LazyValue) -> Option<&'v LazyValue> {
                    v.as_object()?.get(self)
                }
            }
        )*
    };
}

impl_str_index!(str, String, FastStr);

impl<T> Index for &T
where
    T: ?Sized + Index,
{
    #[inline]
    fn index_into<'v>(&self, v: &'v LazyValue) -> Option<&'v LazyValue> {
        (**self).index_into(v)
    }
}
