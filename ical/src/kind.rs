// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Name registries shared by components, properties and parameters.

/// Define a kind enum mapping registered names to variants.
///
/// Names are matched case-insensitively. Anything else is kept as written,
/// as `XName` when it starts with "X-" and as `Unrecognized` otherwise, so no
/// input is dropped.
macro_rules! impl_kind_mapping {
    (
        $(#[$attr:meta])*
        enum $ty:ident {
            $(
                $variant:ident => $kw:ident
            ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $(#[$attr])*
        pub enum $ty {
            $(
                $variant,
            )+
            /// Custom experimental x-name (starts with "X-" or "x-")
            XName(String),
            /// IANA or otherwise unknown name
            Unrecognized(String),
        }

        impl $ty {
            /// Returns the name keyword, upper case for registered kinds
            #[must_use]
            pub fn name(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $kw,
                    )+
                    Self::XName(name) | Self::Unrecognized(name) => name,
                }
            }
        }

        impl From<&str> for $ty {
            fn from(name: &str) -> Self {
                let upper = name.to_ascii_uppercase();
                match upper.as_str() {
                    $(
                        $kw => Self::$variant,
                    )+
                    _ if upper.starts_with("X-") => Self::XName(name.to_owned()),
                    _ => Self::Unrecognized(name.to_owned()),
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.name().fmt(f)
            }
        }
    };
}

pub(crate) use impl_kind_mapping;
