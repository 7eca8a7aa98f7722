//! Dynamic `WHERE` clause shared by the place and event listings.

use cityguide_core::listing::ListingFilter;

/// A rendered `WHERE` clause plus the values to bind, in placeholder order.
pub(crate) struct ListingClause {
    pub where_clause: String,
    pub binds: Vec<String>,
    /// Index of the next free `$n` placeholder.
    pub next_idx: usize,
}

/// Column names the clause is rendered against. `name` and `description`
/// are the case-folded search columns.
pub(crate) struct ListingColumns {
    pub name: &'static str,
    pub description: &'static str,
    pub category_name: &'static str,
}

pub(crate) fn build_listing_clause(filter: &ListingFilter, cols: &ListingColumns) -> ListingClause {
    let mut conditions = Vec::new();
    let mut binds = Vec::new();
    let mut bind_idx = 1usize;

    if let Some(categories) = &filter.categories {
        let placeholders: Vec<String> = categories
            .iter()
            .map(|name| {
                binds.push(name.clone());
                let placeholder = format!("${bind_idx}");
                bind_idx += 1;
                placeholder
            })
            .collect();
        conditions.push(format!(
            "{} IN ({})",
            cols.category_name,
            placeholders.join(", ")
        ));
    }

    if let Some(pattern) = filter.keyword_pattern() {
        binds.push(pattern);
        conditions.push(format!(
            "({name} LIKE ${idx} ESCAPE '\\' OR {description} LIKE ${idx} ESCAPE '\\')",
            name = cols.name,
            description = cols.description,
            idx = bind_idx,
        ));
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    ListingClause {
        where_clause,
        binds,
        next_idx: bind_idx,
    }
}
