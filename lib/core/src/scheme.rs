//! Scheme records and their categorical eligibility fields
//!
//! Every categorical field has a fixed label spelling (what the dataset and
//! the query use) and a small integer code (what the remapped corpus holds).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed categorical type with label <-> code mappings.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => ($label:literal, $code:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Integer code used by the remapped corpus
            #[inline]
            #[must_use]
            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Exact label spelling from the dataset
            #[inline]
            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            #[must_use]
            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownLabel {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

/// A label that is not part of a categorical lookup table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

categorical! {
    /// Ordinal age bucket
    AgeBracket, "age" {
        Below10 => ("Below 10", 0),
        From10To15 => ("10-15", 1),
        From16To20 => ("16-20", 2),
        From21To25 => ("21-25", 3),
        From26To30 => ("26-30", 4),
        From31To35 => ("31-35", 5),
        From36To40 => ("36-40", 6),
        From41To45 => ("41-45", 7),
        From46To50 => ("46-50", 8),
        Above50 => ("Above 50", 9),
    }
}

categorical! {
    SocialCategory, "social_category" {
        Sc => ("SC", 0),
        St => ("ST", 1),
        Obc => ("OBC", 2),
    }
}

categorical! {
    Gender, "gender" {
        Male => ("M", 0),
        Female => ("F", 1),
        Transgender => ("T", 2),
    }
}

categorical! {
    /// Domicile of Tripura flag
    Domicile, "domicile_of_tripura" {
        No => ("N", 0),
        Yes => ("Y", 1),
    }
}

/// A welfare scheme row after cleaning and remapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    #[serde(rename = "scheme_name")]
    pub name: String,
    pub description: String,
    pub age: AgeBracket,
    pub social_category: SocialCategory,
    pub gender: Gender,
    #[serde(rename = "domicile_of_tripura")]
    pub domicile: Domicile,
    /// Present only when the dataset carries a `user_id` column
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl Scheme {
    /// Name and description joined by a single space
    #[must_use]
    pub fn name_and_description(&self) -> String {
        format!("{} {}", self.name, self.description)
    }
}

/// Demographic tokens a user may attach to a search.
///
/// Unset fields are simply left out of the query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demographics {
    pub age: Option<AgeBracket>,
    pub social_category: Option<SocialCategory>,
    pub gender: Option<Gender>,
    pub domicile: Option<Domicile>,
}

impl Demographics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.social_category.is_none()
            && self.gender.is_none()
            && self.domicile.is_none()
    }

    /// Raw labels in age, social category, gender, domicile order
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::with_capacity(4);
        if let Some(age) = self.age {
            labels.push(age.label());
        }
        if let Some(category) = self.social_category {
            labels.push(category.label());
        }
        if let Some(gender) = self.gender {
            labels.push(gender.label());
        }
        if let Some(domicile) = self.domicile {
            labels.push(domicile.label());
        }
        labels
    }
}
