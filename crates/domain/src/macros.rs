//! Macro for the wire-value conversions shared by every domain enum
//!
//! Lead status, lead source, opportunity stage, sort keys and sort direction
//! all travel as lowercase (or camelCase) strings in storage and in the view
//! contract. This macro generates `as_str`, an `ALL` table, `Display` and a
//! case-insensitive `FromStr` from a single variant-to-string mapping.
//!
//! # Example
//!
//! ```rust
//! use seller_console_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Tier {
//!     Gold,
//!     Silver,
//! }
//!
//! impl_domain_enum_conversions!(Tier {
//!     Gold => "gold",
//!     Silver => "silver",
//! });
//!
//! assert_eq!(Tier::Gold.as_str(), "gold");
//! assert_eq!("SILVER".parse::<Tier>().unwrap(), Tier::Silver);
//! assert_eq!(Tier::ALL.len(), 2);
//! ```

/// Implements `as_str`, `ALL`, `Display` and `FromStr` for a fieldless enum.
///
/// Parsing lowercases the input before matching, so the string side of the
/// mapping must itself be lowercase for parsing to round-trip. Mixed-case
/// wire values (such as `createdAt`) still display verbatim and parse because
/// matching compares against the lowercased mapping.
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$enum_name] = &[$(Self::$variant),+];

            /// Wire value of this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lowered = s.trim().to_lowercase();
                $(
                    if lowered == $str.to_lowercase() {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Column {
        Score,
        CreatedAt,
    }

    impl_domain_enum_conversions!(Column {
        Score => "score",
        CreatedAt => "createdAt",
    });

    #[test]
    fn display_uses_wire_value() {
        assert_eq!(Column::Score.to_string(), "score");
        assert_eq!(Column::CreatedAt.to_string(), "createdAt");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Column::from_str("SCORE").unwrap(), Column::Score);
        assert_eq!(Column::from_str("createdat").unwrap(), Column::CreatedAt);
        assert_eq!(Column::from_str(" createdAt ").unwrap(), Column::CreatedAt);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = Column::from_str("value").unwrap_err();
        assert!(err.contains("Invalid Column: value"));
        assert!(Column::from_str("").is_err());
    }

    #[test]
    fn all_lists_variants_in_order() {
        assert_eq!(Column::ALL, &[Column::Score, Column::CreatedAt]);
        for column in Column::ALL {
            assert_eq!(Column::from_str(column.as_str()).unwrap(), *column);
        }
    }
}
