//! Listing parameters for films.
//!
//! Parsing never fails: an unknown sort key falls back to title, and any sort
//! order other than exactly `asc` means descending.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Title,
    Rating,
    ReleaseYear,
}

impl SortBy {
    /// Case-insensitive match of sort key, unknown keys sort by title.
    pub fn from_param(name: &str) -> Self {
        if name.eq_ignore_ascii_case("rating") {
            SortBy::Rating
        } else if name.eq_ignore_ascii_case("releaseyear") {
            SortBy::ReleaseYear
        } else {
            SortBy::Title
        }
    }

    /// SQL expression used in ORDER BY
    pub fn column(&self) -> &'static str {
        match self {
            SortBy::Title => "title_folded",
            SortBy::Rating => "rating",
            SortBy::ReleaseYear => "release_year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only the exact value `asc` is ascending.
    pub fn from_param(order: &str) -> Self {
        if order == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::Asc)
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

/// Parsed listing request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmFilter {
    pub genre: Option<String>,
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn non_empty_str(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

impl FilmFilter {
    pub fn new(
        genre: Option<String>,
        search: Option<String>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> Self {
        Self {
            genre: non_empty(genre),
            search: non_empty(search),
            sort_by: non_empty_str(sort_by)
                .map(SortBy::from_param)
                .unwrap_or_default(),
            sort_order: non_empty_str(sort_order)
                .map(SortOrder::from_param)
                .unwrap_or_default(),
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = non_empty(Some(genre.into()));
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_empty(Some(search.into()));
        self
    }

    pub fn sorted(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// ORDER BY clause content, id breaks ties
    pub fn ordering(&self) -> String {
        format!("{} {}, id ASC", self.sort_by.column(), self.sort_order)
    }
}
