//! The default predicate used by `any` and `all`.

/// Values with a notion of truthiness.
///
/// Everything is truthy except `false` and "no value" (`None`).
pub trait Truthy {
    /// Returns `true` unless the value is `false` or absent.
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! always_truthy {
    ($($type:ty),* $(,)?) => {
        $(
            impl Truthy for $type {
                #[inline]
                fn is_truthy(&self) -> bool {
                    true
                }
            }
        )*
    };
}

always_truthy!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, str, String,
);

impl<T: Truthy> Truthy for Option<T> {
    #[inline]
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    #[inline]
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}
