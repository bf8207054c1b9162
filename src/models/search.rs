//! Search request models and argument normalization.
//!
//! [`SearchRequest`] is what a caller hands in, loosely typed the way tool
//! arguments and query strings arrive. [`SearchRequest::normalize`] turns it
//! into a [`NormalizedSearch`] whose fields are always within the bounds the
//! Unsplash search endpoint accepts.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::unsplash::SearchError;

/// Page used when the caller gives none or a value below 1
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the caller gives none or a non-positive value
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Largest page size Unsplash serves
pub const MAX_PER_PAGE: u32 = 30;

/// A value that is not a member of its allowed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} value: {value}")]
pub struct InvalidValue {
    /// Name of the argument that failed (e.g. "color")
    pub field: &'static str,
    /// The offending value after trimming and lowercasing
    pub value: String,
}

macro_rules! allowed_values {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every allowed value, in the order Unsplash documents them
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation sent upstream and echoed back
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Wire names of every allowed value
            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl FromStr for $name {
            type Err = InvalidValue;

            /// Case-insensitive and whitespace-tolerant.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_lowercase();
                match normalized.as_str() {
                    $($value => Ok($name::$variant),)+
                    _ => Err(InvalidValue {
                        field: $field,
                        value: normalized,
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

allowed_values! {
    /// Result ordering
    #[derive(Default)]
    OrderBy, "order_by" {
        #[default]
        Relevant => "relevant",
        Latest => "latest",
    }
}

allowed_values! {
    /// Dominant color filter
    Color, "color" {
        BlackAndWhite => "black_and_white",
        Black => "black",
        White => "white",
        Yellow => "yellow",
        Orange => "orange",
        Red => "red",
        Purple => "purple",
        Magenta => "magenta",
        Green => "green",
        Teal => "teal",
        Blue => "blue",
    }
}

allowed_values! {
    /// Photo orientation filter
    Orientation, "orientation" {
        Landscape => "landscape",
        Portrait => "portrait",
        Squarish => "squarish",
    }
}

/// Search arguments as supplied by a client.
///
/// Nothing here is validated yet. Integer fields accept JSON numbers or
/// numeric strings; anything unparseable counts as "not supplied" and is
/// replaced by the default during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Search keyword
    #[serde(default)]
    pub query: String,

    /// Page number (1-based)
    #[serde(default = "default_page", deserialize_with = "lenient_int")]
    pub page: i64,

    /// Results per page (1-30)
    #[serde(default = "default_per_page", deserialize_with = "lenient_int")]
    pub per_page: i64,

    /// Sort method (relevant or latest)
    #[serde(default)]
    pub order_by: Option<String>,

    /// Color filter
    #[serde(default)]
    pub color: Option<String>,

    /// Orientation filter
    #[serde(default)]
    pub orientation: Option<String>,
}

fn default_page() -> i64 {
    DEFAULT_PAGE as i64
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE as i64
}

fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0)),
        Value::String(s) => Ok(s.trim().parse::<i64>().unwrap_or(0)),
        Value::Null => Ok(0),
        other => Err(de::Error::custom(format!(
            "expected an integer, found {}",
            other
        ))),
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: default_page(),
            per_page: default_per_page(),
            order_by: None,
            color: None,
            orientation: None,
        }
    }
}

impl SearchRequest {
    /// Create a request for `query` with every other field at its default
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the page number
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Set the page size
    pub fn per_page(mut self, per_page: i64) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the sort method
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Set the color filter
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the orientation filter
    pub fn orientation(mut self, orientation: impl Into<String>) -> Self {
        self.orientation = Some(orientation.into());
        self
    }

    /// Validate and clamp every field.
    ///
    /// Checks run in a fixed order (query, order_by, color, orientation) and
    /// the first failure is returned as [`SearchError::InvalidArgument`].
    /// `page` and `per_page` never fail; they are coerced into range.
    pub fn normalize(&self) -> Result<NormalizedSearch, SearchError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidArgument("query is required".to_string()));
        }

        let order_by = match self.order_by.as_deref().map(str::trim) {
            None | Some("") => OrderBy::default(),
            Some(value) => value.parse::<OrderBy>()?,
        };

        let color = parse_optional::<Color>(self.color.as_deref())?;
        let orientation = parse_optional::<Orientation>(self.orientation.as_deref())?;

        Ok(NormalizedSearch {
            query: query.to_string(),
            page: normalize_page(self.page),
            per_page: clamp_per_page(self.per_page),
            order_by,
            color,
            orientation,
        })
    }
}

/// Pages below 1 become 1; there is no upper bound.
pub fn normalize_page(page: i64) -> u64 {
    if page < 1 {
        DEFAULT_PAGE
    } else {
        page as u64
    }
}

/// Non-positive sizes become the default, oversized ones are clamped.
pub fn clamp_per_page(per_page: i64) -> u32 {
    if per_page <= 0 {
        DEFAULT_PER_PAGE
    } else if per_page > MAX_PER_PAGE as i64 {
        MAX_PER_PAGE
    } else {
        per_page as u32
    }
}

/// Parse an optional enum argument, treating blank input as unset.
pub fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, InvalidValue>
where
    T: FromStr<Err = InvalidValue>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse::<T>().map(Some),
    }
}

/// A search whose arguments are known to be acceptable upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSearch {
    pub query: String,
    pub page: u64,
    pub per_page: u32,
    pub order_by: OrderBy,
    pub color: Option<Color>,
    pub orientation: Option<Orientation>,
}

impl NormalizedSearch {
    /// Query-string pairs for the upstream call; unset filters are left out
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("order_by", self.order_by.as_str().to_string()),
        ];
        if let Some(color) = self.color {
            params.push(("color", color.as_str().to_string()));
        }
        if let Some(orientation) = self.orientation {
            params.push(("orientation", orientation.as_str().to_string()));
        }
        params
    }
}
