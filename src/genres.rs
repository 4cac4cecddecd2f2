use serde::{Deserialize, Serialize};

/// Separator used for the `genres` column.
const STORAGE_SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenreError {
    #[error("At least one genre is required")]
    Empty,
    #[error("Genre names cannot be blank")]
    BlankName,
    #[error("Genre '{0}' contains a comma, which is not allowed")]
    ContainsSeparator(String),
}

/// Ordered list of genre names.
///
/// The database keeps genres in a single comma-joined column, so a name
/// containing a comma cannot round-trip and is rejected on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genres(Vec<String>);

impl Genres {
    /// Build a validated genre list. Names are trimmed and must be non-blank.
    pub fn new<I, S>(names: I) -> Result<Self, GenreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut genres = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(GenreError::BlankName);
            }
            if name.contains(STORAGE_SEPARATOR) {
                return Err(GenreError::ContainsSeparator(name.to_string()));
            }
            genres.push(name.to_string());
        }

        if genres.is_empty() {
            return Err(GenreError::Empty);
        }

        Ok(Self(genres))
    }

    /// Decode the stored column value. Empty segments are dropped.
    pub fn from_storage(raw: &str) -> Self {
        Self(
            raw.split(STORAGE_SEPARATOR)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn to_storage(&self) -> String {
        self.0.join(&STORAGE_SEPARATOR.to_string())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_splits_on_comma() {
        let genres = Genres::from_storage("Jazz,Folk");
        assert_eq!(genres.as_slice(), ["Jazz", "Folk"]);
    }

    #[test]
    fn test_from_storage_trims_and_drops_empty_segments() {
        let genres = Genres::from_storage(" Jazz , ,Reggae,");
        assert_eq!(genres.as_slice(), ["Jazz", "Reggae"]);

        assert!(Genres::from_storage("").as_slice().is_empty());
    }

    #[test]
    fn test_to_storage_joins_in_order() {
        let genres = Genres::new(["Swing", "Classical", "Folk"]).unwrap();
        assert_eq!(genres.to_storage(), "Swing,Classical,Folk");
    }

    #[test]
    fn test_new_rejects_comma_in_name() {
        let result = Genres::new(["Rock, Roll"]);
        assert_eq!(
            result,
            Err(GenreError::ContainsSeparator("Rock, Roll".to_string()))
        );
    }

    #[test]
    fn test_new_rejects_empty_and_blank() {
        assert_eq!(Genres::new(Vec::<String>::new()), Err(GenreError::Empty));
        assert_eq!(Genres::new(["Jazz", "  "]), Err(GenreError::BlankName));
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let genres = Genres::new(["Jazz", "Folk"]).unwrap();
        let json = serde_json::to_string(&genres).unwrap();
        assert_eq!(json, r#"["Jazz","Folk"]"#);
    }
}
