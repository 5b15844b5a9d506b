//! Query-string contract of the partial endpoint.
//!
//! `?page=<int>&page_size=<int>&sort=<column>&direction=<asc|desc>`
//!
//! Every field is read leniently: malformed values fall back to defaults so
//! stale or hand-edited client state still renders something sensible.
//! Repeated keys keep their first value.

use crate::data::Direction;
use crate::table::config::DEFAULT_PAGE_SIZE;

/// Raw query parameters, kept as strings so parsing never rejects a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// Requested view state of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Requested page; clamped at render time.
    pub page: i64,
    /// `None` means "use the table's configured page size", as page embeds do.
    pub page_size: Option<usize>,
    pub sort: Option<String>,
    pub direction: Direction,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: None,
            sort: None,
            direction: Direction::Asc,
        }
    }
}

impl TableView {
    /// First page with an initial sort.
    pub fn sorted(sort: Option<&str>, direction: Direction) -> Self {
        Self {
            sort: sort.map(str::to_owned),
            direction,
            ..Self::default()
        }
    }
}

impl TableQuery {
    /// Parse a raw query string.
    pub fn parse(raw: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw).unwrap_or_default();
        Self::from_pairs(pairs)
    }

    /// Collect the known keys from decoded pairs, first occurrence wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "page_size" => &mut query.page_size,
                "sort" => &mut query.sort,
                "direction" => &mut query.direction,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// View requested through the partial endpoint. An absent or malformed
    /// `page_size` means [`DEFAULT_PAGE_SIZE`].
    pub fn into_view(self) -> TableView {
        let page = self
            .page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1);
        let page_size = self
            .page_size
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let sort = self.sort.filter(|s| !s.is_empty());
        let direction = self
            .direction
            .as_deref()
            .map(Direction::parse)
            .unwrap_or_default();
        TableView {
            page,
            page_size: Some(page_size),
            sort,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(raw: &str) -> TableView {
        TableQuery::parse(raw).into_view()
    }

    fn endpoint_default() -> TableView {
        TableView {
            page_size: Some(DEFAULT_PAGE_SIZE),
            ..TableView::default()
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(query(""), endpoint_default());
    }

    #[test]
    fn test_well_formed() {
        let view = query("page=3&page_size=5&sort=latency_ms&direction=desc");
        assert_eq!(view.page, 3);
        assert_eq!(view.page_size, Some(5));
        assert_eq!(view.sort.as_deref(), Some("latency_ms"));
        assert_eq!(view.direction, Direction::Desc);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let view = query("page=abc&page_size=-4&sort=&direction=up");
        assert_eq!(view, endpoint_default());
    }

    #[test]
    fn test_repeated_keys_keep_first() {
        let view = query("page=2&page=5&sort=a&sort=b&direction=desc&direction=asc");
        assert_eq!(view.page, 2);
        assert_eq!(view.sort.as_deref(), Some("a"));
        assert_eq!(view.direction, Direction::Desc);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let view = TableView {
            page_size: Some(4),
            ..TableView::default()
        };
        assert_eq!(query("foo=1&page_size=4"), view);
    }

    #[test]
    fn test_negative_page_is_kept_for_clamping() {
        assert_eq!(query("page=-2").page, -2);
    }
}
