use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, Condition, Order};

use crate::types::db::product;

/// Page size applied when the request does not specify one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Upper bound for the requested page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Filter criteria for catalog listings.
///
/// Empty strings are normalized to "no filter" so `?name=` behaves like
/// an unfiltered request. Listings only ever see active products; the
/// active clause is not optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    name: Option<String>,
    category: Option<String>,
}

impl ProductFilter {
    pub fn new(name: Option<String>, category: Option<String>) -> Self {
        Self {
            name: name.filter(|value| !value.is_empty()),
            category: category.filter(|value| !value.is_empty()),
        }
    }

    /// Build the WHERE condition for this filter.
    ///
    /// Name matching is a case-insensitive substring match (both sides
    /// lowered), category is an exact match, and every condition is
    /// AND-combined with `active = true`.
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all().add(product::Column::Active.eq(true));

        if let Some(name) = &self.name {
            let pattern = format!("%{}%", name.to_lowercase());
            condition = condition
                .add(Expr::expr(Func::lower(Expr::col(product::Column::Name))).like(pattern));
        }

        if let Some(category) = &self.category {
            condition = condition.add(product::Column::Category.eq(category.as_str()));
        }

        condition
    }
}

/// Columns a listing may be sorted by. Anything else in the sort
/// parameter is ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name,
    Price,
    Category,
}

impl SortKey {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(SortKey::Id),
            "name" => Some(SortKey::Name),
            "price" => Some(SortKey::Price),
            "category" => Some(SortKey::Category),
            _ => None,
        }
    }

    pub fn column(self) -> product::Column {
        match self {
            SortKey::Id => product::Column::Id,
            SortKey::Name => product::Column::Name,
            SortKey::Price => product::Column::Price,
            SortKey::Category => product::Column::Category,
        }
    }
}

/// Parsed `field,direction` sort parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: Order,
}

impl SortSpec {
    /// Parse `field` or `field,direction`.
    ///
    /// Returns None for fields outside the whitelist. The direction is
    /// matched case-insensitively and anything other than "desc" falls
    /// back to ascending.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(',');
        let key = SortKey::parse(parts.next()?.trim())?;
        let order = match parts.next().map(str::trim) {
            Some(direction) if direction.eq_ignore_ascii_case("desc") => Order::Desc,
            _ => Order::Asc,
        };
        Some(Self { key, order })
    }
}

/// Normalized pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u64,
    /// Rows per page, clamped to 1..=MAX_PAGE_SIZE
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: Option<u64>, size: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(0),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Offset of the first row on this page.
    pub fn offset(&self) -> u64 {
        self.page * self.size
    }
}
