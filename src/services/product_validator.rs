use rust_decimal::Decimal;

use crate::types::dto::common::FieldError;
use crate::types::dto::product::{ProductDraft, ProductPatch};

/// Allowed catalog categories, also spelled out in the category error message
pub const CATEGORIES: [&str; 10] = [
    "Electronics",
    "Books",
    "Furniture",
    "Food",
    "Clothing",
    "Sports",
    "Home",
    "Beauty",
    "Automotive",
    "Toys",
];

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 500;
const PRICE_MAX_SCALE: u32 = 2;

// Prices are stored as DECIMAL(10, 2), so at most 8 integer digits
const PRICE_INTEGER_LIMIT: i64 = 100_000_000;

/// Validate a full product payload, collecting every violation instead
/// of stopping at the first one.
///
/// # Returns
/// * `Ok(())` - Payload passes all rules
/// * `Err(Vec<FieldError>)` - One entry per violated rule
pub fn validate_draft(draft: &ProductDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    check_name(&draft.name, &mut errors);
    if let Some(description) = &draft.description {
        check_description(description, &mut errors);
    }
    check_price(draft.price, &mut errors);
    check_category(&draft.category, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the fields present in a patch with the same rules as
/// [`validate_draft`]. Absent fields are not checked.
pub fn validate_patch(patch: &ProductPatch) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Some(name) = &patch.name {
        check_name(name, &mut errors);
    }
    if let Some(description) = &patch.description {
        check_description(description, &mut errors);
    }
    if let Some(price) = patch.price {
        check_price(price, &mut errors);
    }
    if let Some(category) = &patch.category {
        check_category(category, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    if name.trim().is_empty() {
        errors.push(violation("name", "Product name is required"));
        return;
    }

    let length = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&length) {
        errors.push(violation(
            "name",
            "Product name must be between 3 and 100 characters",
        ));
    }
}

fn check_description(description: &str, errors: &mut Vec<FieldError>) {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.push(violation(
            "description",
            "Description cannot exceed 500 characters",
        ));
    }
}

fn check_price(price: Decimal, errors: &mut Vec<FieldError>) {
    if price < Decimal::ZERO {
        errors.push(violation("price", "Price must be positive"));
    }

    if price.scale() > PRICE_MAX_SCALE || price.abs().trunc() >= Decimal::from(PRICE_INTEGER_LIMIT)
    {
        errors.push(violation("price", "Price format is invalid"));
    }
}

fn check_category(category: &str, errors: &mut Vec<FieldError>) {
    if category.trim().is_empty() {
        errors.push(violation("category", "Category is required"));
        return;
    }

    if !CATEGORIES.contains(&category) {
        errors.push(violation(
            "category",
            "Category must be one of: Electronics, Books, Furniture, Food, Clothing, Sports, Home, Beauty, Automotive, Toys",
        ));
    }
}

fn violation(field: &str, message: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        message: message.to_string(),
    }
}
