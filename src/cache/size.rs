//! Size Estimation Module
//!
//! Byte-size estimates used only for the statistics ledger.

use std::mem;
use std::rc::Rc;
use std::sync::Arc;

// == Size Of ==
/// Estimates the memory footprint of a value in bytes.
///
/// The estimate is the inline size of the value plus any heap bytes it owns.
/// Implement this for custom payload types stored in a [`Cache`](crate::Cache).
pub trait SizeOf {
    /// Returns the estimated size in bytes.
    fn size_of(&self) -> usize;
}

macro_rules! impl_size_of_inline {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SizeOf for $ty {
                fn size_of(&self) -> usize {
                    mem::size_of::<$ty>()
                }
            }
        )*
    };
}

impl_size_of_inline!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
);

impl SizeOf for str {
    fn size_of(&self) -> usize {
        self.len()
    }
}

impl SizeOf for String {
    fn size_of(&self) -> usize {
        mem::size_of::<String>() + self.len()
    }
}

impl<T: SizeOf> SizeOf for [T] {
    fn size_of(&self) -> usize {
        self.iter().map(SizeOf::size_of).sum()
    }
}

impl<T: SizeOf> SizeOf for Vec<T> {
    fn size_of(&self) -> usize {
        mem::size_of::<Vec<T>>() + self.as_slice().size_of()
    }
}

impl<T: SizeOf> SizeOf for Option<T> {
    fn size_of(&self) -> usize {
        match self {
            // Niche-optimised layouts make the inline size exact for Some as well.
            Some(inner) => mem::size_of::<Option<T>>() - mem::size_of::<T>() + inner.size_of(),
            None => mem::size_of::<Option<T>>(),
        }
    }
}

impl<T: SizeOf + ?Sized> SizeOf for &T {
    fn size_of(&self) -> usize {
        mem::size_of::<&T>() + (**self).size_of()
    }
}

impl<T: SizeOf + ?Sized> SizeOf for Box<T> {
    fn size_of(&self) -> usize {
        mem::size_of::<Box<T>>() + (**self).size_of()
    }
}

impl<T: SizeOf + ?Sized> SizeOf for Arc<T> {
    fn size_of(&self) -> usize {
        mem::size_of::<Arc<T>>() + (**self).size_of()
    }
}

impl<T: SizeOf + ?Sized> SizeOf for Rc<T> {
    fn size_of(&self) -> usize {
        mem::size_of::<Rc<T>>() + (**self).size_of()
    }
}
