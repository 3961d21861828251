//! Text rendering of field values.

use std::sync::Arc;

/// Default text representation of a field value.
///
/// Strings, numbers and other `Display` primitives render as themselves,
/// an absent value renders as `null`, sequences as `[a, b]`. Event payload
/// types opt in with [`crate::display_field_value!`].
pub trait FieldValue {
    fn render(&self) -> String;
}

/// Implements [`FieldValue`] through `Display` for the listed types.
#[macro_export]
macro_rules! display_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::details::FieldValue for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_field_value!(
    String, str, bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32,
    f64, std::net::SocketAddr
);

impl FieldValue for std::path::PathBuf {
    fn render(&self) -> String {
        self.display().to_string()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Arc<T> {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn render(&self) -> String {
        match self {
            Some(value) => value.render(),
            None => "null".to_string(),
        }
    }
}

impl<T: FieldValue> FieldValue for [T] {
    fn render(&self) -> String {
        let items: Vec<String> = self.iter().map(FieldValue::render).collect();
        format!("[{}]", items.join(", "))
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn render(&self) -> String {
        self.as_slice().render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_render_as_display() {
        assert_eq!("STONE".render(), "STONE");
        assert_eq!(String::from("Alice").render(), "Alice");
        assert_eq!(42u32.render(), "42");
        assert_eq!(true.render(), "true");
        assert_eq!(1.5f64.render(), "1.5");
    }

    #[test]
    fn test_absent_value_renders_null() {
        let missing: Option<String> = None;
        assert_eq!(missing.render(), "null");
        assert_eq!(Some(7i64).render(), "7");
    }

    #[test]
    fn test_sequences_render_bracketed() {
        assert_eq!(vec!["a", "b"].render(), "[a, b]");
        assert_eq!(Vec::<u8>::new().render(), "[]");
        assert_eq!(vec![Some(1), None].render(), "[1, null]");
    }
}
