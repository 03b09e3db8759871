//! Paging and sorting contract for catalog listings.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;

/// Items fetched per page when the caller does not say otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    Title,
    Price,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort order, written on the wire as `"field,dir"` (e.g. `"price,desc"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Sorting by the same field again flips direction; a new field starts ascending.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.toggled())
        } else {
            Self::new(field, SortDirection::Asc)
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new(SortField::Id, SortDirection::Asc)
    }
}

impl core::fmt::Display for Sort {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let field = match self.field {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Price => "price",
            SortField::Count => "count",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{field},{direction}")
    }
}

impl FromStr for Sort {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(',') {
            Some((field, direction)) => (field.trim(), direction.trim()),
            None => (s.trim(), "asc"),
        };

        let field = match field.to_lowercase().as_str() {
            "id" => SortField::Id,
            "title" => SortField::Title,
            "price" => SortField::Price,
            "count" => SortField::Count,
            _ => return Err(CatalogError::InvalidSort(s.to_string())),
        };
        let direction = match direction.to_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(CatalogError::InvalidSort(s.to_string())),
        };

        Ok(Self { field, direction })
    }
}

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: usize, size: usize, sort: Sort) -> Self {
        Self { page, size, sort }
    }

    pub fn first(size: usize, sort: Sort) -> Self {
        Self::new(0, size, sort)
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page + 1,
            ..*self
        }
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE, Sort::default())
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total: usize,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Cut a page out of an already filtered and sorted result set.
    pub fn slice(all: Vec<T>, request: &PageRequest) -> Self {
        let total = all.len();
        let offset = request.offset().min(total);
        let items: Vec<T> = all.into_iter().skip(offset).take(request.size).collect();
        let has_more = offset + items.len() < total;
        Self {
            items,
            page: request.page,
            total,
            has_more,
        }
    }
}
