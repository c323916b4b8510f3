use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_IMAGE_COUNT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("search term must not be empty")]
    EmptyQuery,
    #[error("image count must be at least 1")]
    ZeroImageCount,
    #[error("unknown filter name: {0}")]
    UnknownFilter(String),
}

/// Filter names understood by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterName {
    Size,
    Color,
    Type,
    Time,
    UserRights,
}

impl FilterName {
    pub const ALL: [FilterName; 5] = [
        FilterName::Size,
        FilterName::Color,
        FilterName::Type,
        FilterName::Time,
        FilterName::UserRights,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            FilterName::Size => "size",
            FilterName::Color => "color",
            FilterName::Type => "type",
            FilterName::Time => "time",
            FilterName::UserRights => "userRights",
        }
    }

    /// Known `(token, label)` pairs. The service may accept others; values are
    /// passed through verbatim either way.
    pub fn known_values(self) -> &'static [(&'static str, &'static str)] {
        match self {
            FilterName::Size => &[("l", "Large"), ("m", "Medium"), ("i", "Icon")],
            FilterName::Color => &[
                ("gray", "Black & White"),
                ("trans", "Transparent"),
                ("specific,isc:red", "Red"),
                ("specific,isc:orange", "Orange"),
                ("specific,isc:yellow", "Yellow"),
                ("specific,isc:green", "Green"),
                ("specific,isc:teal", "Teal"),
                ("specific,isc:blue", "Blue"),
                ("specific,isc:purple", "Purple"),
                ("specific,isc:pink", "Pink"),
                ("specific,isc:white", "White"),
                ("specific,isc:gray", "Gray"),
                ("specific,isc:black", "Black"),
                ("specific,isc:brown", "Brown"),
            ],
            FilterName::Type => &[
                ("clipart", "Clip Art"),
                ("lineart", "Line Drawing"),
                ("animated", "GIF"),
            ],
            FilterName::Time => &[
                ("d", "Past 24 Hours"),
                ("w", "Past Week"),
                ("m", "Past Month"),
                ("y", "Past Year"),
            ],
            FilterName::UserRights => &[
                ("cl", "Creative Cloud License"),
                ("ol", "Commercial & Other License"),
            ],
        }
    }

    /// Empty means unconstrained and is always accepted.
    pub fn is_known_value(self, value: &str) -> bool {
        value.is_empty() || self.known_values().iter().any(|(token, _)| *token == value)
    }
}

impl fmt::Display for FilterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FilterName {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "size" => Ok(FilterName::Size),
            "color" => Ok(FilterName::Color),
            "type" => Ok(FilterName::Type),
            "time" | "recency" => Ok(FilterName::Time),
            "userRights" | "usageRights" => Ok(FilterName::UserRights),
            other => Err(RequestError::UnknownFilter(other.to_string())),
        }
    }
}

/// One value per filter; empty string means unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilters {
    pub size: String,
    pub color: String,
    pub image_type: String,
    pub time: String,
    pub user_rights: String,
}

impl SearchFilters {
    pub fn get(&self, name: FilterName) -> &str {
        match name {
            FilterName::Size => &self.size,
            FilterName::Color => &self.color,
            FilterName::Type => &self.image_type,
            FilterName::Time => &self.time,
            FilterName::UserRights => &self.user_rights,
        }
    }

    fn slot_mut(&mut self, name: FilterName) -> &mut String {
        match name {
            FilterName::Size => &mut self.size,
            FilterName::Color => &mut self.color,
            FilterName::Type => &mut self.image_type,
            FilterName::Time => &mut self.time,
            FilterName::UserRights => &mut self.user_rights,
        }
    }

    /// Filters whose value is set but not among the known tokens.
    pub fn unrecognized(&self) -> Vec<(FilterName, &str)> {
        FilterName::ALL
            .into_iter()
            .map(|name| (name, self.get(name)))
            .filter(|(name, value)| !name.is_known_value(value))
            .collect()
    }
}

/// A validated search submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    image_count: u32,
    filters: SearchFilters,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, image_count: u32) -> Result<Self, RequestError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(RequestError::EmptyQuery);
        }
        if image_count == 0 {
            return Err(RequestError::ZeroImageCount);
        }
        Ok(Self {
            query,
            image_count,
            filters: SearchFilters::default(),
        })
    }

    pub fn with_filter(mut self, name: FilterName, value: impl Into<String>) -> Self {
        *self.filters.slot_mut(name) = value.into();
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn image_count(&self) -> u32 {
        self.image_count
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }
}
