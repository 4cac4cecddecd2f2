use serde::Serialize;

pub mod artist;
pub mod error;
pub mod forms;
pub mod schedule;
pub mod show;
pub mod venue;

/// City of placeholder rows. These never show up in the venue or artist listings.
pub const UNKNOWN_CITY: &str = "N/A";

/// Name of placeholder rows. These never show up in search results.
pub const PLACEHOLDER_NAME: &str = "TBD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    /// Not computed for search results, always 0.
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: u64,
    pub data: Vec<SearchHit>,
}

impl SearchResults {
    /// Keep the `(id, name)` rows whose name contains `term`.
    pub(crate) fn matching(rows: Vec<(i64, String)>, term: &str) -> Self {
        let data: Vec<SearchHit> = rows
            .into_iter()
            .filter(|(_, name)| name_matches(name, term))
            .map(|(id, name)| SearchHit {
                id,
                name,
                num_upcoming_shows: 0,
            })
            .collect();

        Self {
            count: data.len() as u64,
            data,
        }
    }
}

/// Case-insensitive substring match on a name. Folds any letter, not just ASCII.
pub(crate) fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_folds_any_letter() {
        assert!(name_matches("The Musical Hop", "  hop "));
        assert!(name_matches("CAFÉ NOIR", "café"));
        assert!(name_matches("Ünter den Linden", "ün"));
        assert!(!name_matches("The Hop", "%"));
        assert!(name_matches("The Hop", ""));
    }

    #[test]
    fn test_search_results_count_matches_data() {
        let results = SearchResults::matching(
            vec![
                (1, "The Musical Hop".into()),
                (2, "The Dueling Pianos Bar".into()),
                (3, "Park Square Live Music & Coffee".into()),
            ],
            "mus",
        );
        assert_eq!(results.count, 2);
        assert_eq!(results.data[1].id, 3);
        assert!(results.data.iter().all(|hit| hit.num_upcoming_shows == 0));
    }
}
