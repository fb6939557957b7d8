//! # Base + Override Composition
//!
//! One composition rule for every partial shape in the schema: a field set in
//! the override wins, a field left unset keeps the base value, and nested
//! partial shapes compose recursively.
//!
//! ```rust
//! use letter_schema::{compose, PaletteSpec};
//!
//! let base = PaletteSpec { primary: Some("#C9A962".into()), text: Some("#2D2319".into()), ..Default::default() };
//! let over = PaletteSpec { primary: Some("#E8A0A0".into()), ..Default::default() };
//!
//! let merged = compose(&base, &over);
//! assert_eq!(merged.primary.as_deref(), Some("#E8A0A0"));
//! assert_eq!(merged.text.as_deref(), Some("#2D2319"));
//! ```

use std::collections::BTreeMap;

/// Field-wise override composition
pub trait Compose: Clone {
    fn compose(&self, over: &Self) -> Self;
}

/// Compose `over` on top of `base`
pub fn compose<T: Compose>(base: &T, over: &T) -> T {
    base.compose(over)
}

impl<T: Compose> Compose for Option<T> {
    fn compose(&self, over: &Self) -> Self {
        match (self, over) {
            (Some(base), Some(over)) => Some(base.compose(over)),
            (None, Some(over)) => Some(over.clone()),
            (base, None) => base.clone(),
        }
    }
}

impl<T: Compose> Compose for BTreeMap<String, T> {
    fn compose(&self, over: &Self) -> Self {
        let mut merged = self.clone();
        for (key, value) in over {
            let next = match merged.get(key) {
                Some(existing) => existing.compose(value),
                None => value.clone(),
            };
            merged.insert(key.clone(), next);
        }
        merged
    }
}

/// Leaf values: the override always replaces the base.
macro_rules! impl_compose_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Compose for $ty {
                fn compose(&self, over: &Self) -> Self {
                    over.clone()
                }
            }
        )*
    };
}

impl_compose_leaf!(String, bool, u16, u32, f64);

/// Structs whose fields are all composable.
#[macro_export]
macro_rules! impl_compose_fields {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::compose::Compose for $ty {
            fn compose(&self, over: &Self) -> Self {
                Self {
                    $($field: $crate::compose::Compose::compose(&self.$field, &over.$field),)*
                }
            }
        }
    };
}
