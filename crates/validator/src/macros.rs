//! Macros for declaring records with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`record!`]: build a [`Record`](crate::foundation::Record) from
//!   `"wire" : "rules" => value` entries
//! - [`validatable!`]: implement [`Validatable`](crate::foundation::Validatable)
//!   for a struct by annotating its fields

// ============================================================================
// RECORD MACRO
// ============================================================================

/// Builds a [`Record`](crate::foundation::Record) in declaration order.
///
/// Each entry is `wire_name : rule_chain => value`; values go through
/// `Value::from`.
///
/// # Examples
///
/// ```
/// use validata::record;
///
/// let signup = record! {
///     "email": "required|email" => "kofi@mail.gh",
///     "age": "required|min:18" => 21_u32,
///     "tags": "slice:max:3|alpha" => vec!["a", "b"],
/// };
/// assert_eq!(signup.len(), 3);
/// assert_eq!(signup.get("age").and_then(|f| f.rule_chain()), Some("required|min:18"));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::foundation::Record::new()
    };
    ($($wire:literal : $rules:literal => $value:expr),+ $(,)?) => {
        $crate::foundation::Record::new()
            $(.field($wire, $rules, $value))+
    };
}

// ============================================================================
// VALIDATABLE MACRO
// ============================================================================

/// Implements [`Validatable`](crate::foundation::Validatable) for a struct by
/// listing its fields with their wire names and rule chains.
///
/// Field values are cloned into the record, so each field type must be
/// `Clone` and convertible into [`Value`](crate::foundation::Value).
///
/// # Examples
///
/// ```
/// use validata::foundation::Validatable;
/// use validata::validatable;
///
/// struct Signup {
///     email: String,
///     age: u32,
/// }
///
/// validatable! {
///     Signup {
///         email: "email" => "required|email",
///         age: "age" => "required|min:18",
///     }
/// }
///
/// let record = Signup { email: "kofi@mail.gh".into(), age: 17 }.to_record();
/// assert_eq!(record.fields()[1].name(), "age");
/// ```
#[macro_export]
macro_rules! validatable {
    ($ty:ty { $($field:ident : $wire:literal => $rules:literal),+ $(,)? }) => {
        impl $crate::foundation::Validatable for $ty {
            fn to_record(&self) -> $crate::foundation::Record {
                $crate::foundation::Record::new()
                    $(.with_field(
                        $crate::foundation::Field::declared(
                            stringify!($field),
                            ::std::clone::Clone::clone(&self.$field),
                        )
                        .wire_name($wire)
                        .rules($rules),
                    ))+
            }
        }
    };
}
