use crate::models::{SkillOffer, SearchContext};

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// Check if an offer belongs to the selected category
///
/// No selection, a blank selection and "all" all pass every offer.
#[inline]
pub fn matches_category(offer: &SkillOffer, category: Option<&str>) -> bool {
    match category.map(str::trim) {
        None | Some("") => true,
        Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => true,
        Some(c) => offer.category.eq_ignore_ascii_case(c),
    }
}

/// Case-insensitive substring match on title or description
#[inline]
pub fn matches_query(offer: &SkillOffer, query: Option<&str>) -> bool {
    let needle = match query.map(str::trim) {
        None | Some("") => return true,
        Some(q) => q.to_lowercase(),
    };

    offer.title.to_lowercase().contains(&needle)
        || offer.description.to_lowercase().contains(&needle)
}

#[inline]
pub fn matches_availability(offer: &SkillOffer, available_only: bool) -> bool {
    !available_only || offer.available
}

/// Apply every non-geographic filter of a search context
#[inline]
pub fn matches_search_filters(offer: &SkillOffer, context: &SearchContext) -> bool {
    matches_category(offer, context.category.as_deref())
        && matches_query(offer, context.query.as_deref())
        && matches_availability(offer, context.available_only)
}
