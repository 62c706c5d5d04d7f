//! Utility macros for declaring hydratable types

/// Implement [`Hydratable`](crate::Hydratable) from a constructor declaration.
///
/// Parameter identifiers are the declared parameter names, so camelCase names
/// are allowed and drive the key heuristic exactly as written. The constructor
/// expression is called with the converted arguments in declaration order.
///
/// # Examples
///
/// ```
/// use hydrator::{hydratable, Hydratable};
///
/// struct User {
///     id: u64,
///     email: String,
/// }
///
/// hydratable!(User { userId: u64, emailAddress: String } => |id, email| User { id, email });
///
/// assert_eq!(User::constructor_parameters(), &["userId", "emailAddress"]);
/// assert!(User::construct_default().is_err());
/// ```
///
/// With a zero-argument constructor:
///
/// ```
/// use hydrator::hydratable;
///
/// #[derive(Default)]
/// struct Settings {
///     theme: String,
/// }
///
/// hydratable!(Settings { theme: String } => |theme| Settings { theme }, default => Settings::default());
/// ```
#[macro_export]
macro_rules! hydratable {
    ($ty:ident { $($param:ident : $pty:ty),* $(,)? } => $ctor:expr $(, default => $default:expr)?) => {
        impl $crate::Hydratable for $ty {
            fn type_name() -> &'static str {
                stringify!($ty)
            }

            fn constructor_parameters() -> &'static [&'static str] {
                &[$(stringify!($param)),*]
            }

            #[allow(non_snake_case, unused_mut, clippy::redundant_closure_call)]
            fn construct(
                mut args: $crate::CallArguments,
            ) -> $crate::HydrationResult<Self> {
                $(
                    let $param: $pty = args.take()?;
                )*
                Ok(($ctor)($($param),*))
            }

            $(
                fn has_default_constructor() -> bool {
                    true
                }

                fn construct_default() -> $crate::HydrationResult<Self> {
                    Ok($default)
                }
            )?
        }
    };
}
