//! Macro for implementing Display and FromStr for status enums
//!
//! This macro eliminates boilerplate for status enum conversions by providing
//! a single implementation for both Display and FromStr traits. It handles
//! case-insensitive parsing and consistent string representation.
//!
//! # Example
//!
//! ```rust
//! use creatorlink_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum LinkState {
//!     Linked,
//!     Unlinked,
//! }
//!
//! impl_domain_status_conversions!(LinkState {
//!     Linked => "linked",
//!     Unlinked => "unlinked",
//! });
//! ```

/// Implements Display and FromStr traits for status enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their lowercase names
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// String representations must be lowercase for parsing to match.
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Visibility {
        Public,
        Private,
    }

    impl_domain_status_conversions!(Visibility {
        Public => "public",
        Private => "private",
    });

    #[test]
    fn displays_lowercase_names() {
        assert_eq!(Visibility::Public.to_string(), "public");
        assert_eq!(Visibility::Private.to_string(), "private");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Visibility::from_str("PUBLIC").unwrap(), Visibility::Public);
        assert_eq!(Visibility::from_str("Private").unwrap(), Visibility::Private);
    }

    #[test]
    fn rejects_unknown_values() {
        let err = Visibility::from_str("friends-only").unwrap_err();
        assert!(err.contains("Invalid Visibility: friends-only"));
        assert!(Visibility::from_str("").is_err());
    }
}
