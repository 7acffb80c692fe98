use api_types::expense::Expense;

/// Narrows `items` to the expenses matching `query`.
///
/// A trimmed-empty query returns the list unchanged. Otherwise an expense
/// matches when its category or establishment name contains the query as a
/// case-insensitive substring (plain lowercase comparison, no Unicode
/// folding). Relative order is preserved.
pub fn filter_expenses(query: &str, items: &[Expense]) -> Vec<Expense> {
    let query = query.trim();
    if query.is_empty() {
        return items.to_vec();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|expense| {
            expense.category_name.to_lowercase().contains(&needle)
                || expense.establishment_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(category: &str, establishment: &str) -> Expense {
        Expense {
            id: format!("{category}-{establishment}"),
            category_name: category.to_string(),
            establishment_name: establishment.to_string(),
            amount: 10.0,
            create_dt: "2024-04-19T14:05:22.000Z".to_string(),
        }
    }

    #[test]
    fn empty_query_returns_items_unchanged() {
        let items = vec![expense("Food", "Market"), expense("Transport", "Taxi")];
        assert_eq!(filter_expenses("", &items), items);
        assert_eq!(filter_expenses("   ", &items), items);
        assert_eq!(filter_expenses("\t", &items), items);
    }

    #[test]
    fn matches_either_field_case_insensitive() {
        let items = vec![expense("Food", "Market"), expense("Transport", "Taxi")];

        let result = filter_expenses("tr", &items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category_name, "Transport");

        let result = filter_expenses("MARK", &items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].establishment_name, "Market");
    }

    #[test]
    fn preserves_relative_order() {
        let items = vec![
            expense("Food", "Padaria"),
            expense("Transport", "Taxi"),
            expense("Food", "Mercado"),
        ];

        let result = filter_expenses("food", &items);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].establishment_name, "Padaria");
        assert_eq!(result[1].establishment_name, "Mercado");
    }

    #[test]
    fn no_match_returns_empty() {
        let items = vec![expense("Food", "Market")];
        assert!(filter_expenses("xyz", &items).is_empty());
    }

    #[test]
    fn empty_items_stay_empty_for_any_query() {
        let items: Vec<Expense> = Vec::new();
        assert!(filter_expenses("", &items).is_empty());
        assert!(filter_expenses("food", &items).is_empty());
    }
}
