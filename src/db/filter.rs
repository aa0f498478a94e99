//! Query builders: translation of request parameters into store filter
//! predicates. Rendering to SQL happens here so the backend only has to
//! splice the predicate into a SELECT.

/// Filter predicate over the movies collection.
#[derive(Debug, Clone, PartialEq)]
pub enum MovieFilter {
    All,
    TitleContains(String),
    GenreContains(String),
}

/// `/highRatedMovies` returns at most this many documents, rating
/// descending. Order among equal ratings is whatever the store yields.
pub const TOP_RATED_LIMIT: i64 = 6;

impl MovieFilter {
    /// Optional `searchParams` query value. Absent or empty means
    /// unconstrained.
    pub fn from_search(term: Option<&str>) -> Self {
        match term {
            Some(t) if !t.is_empty() => MovieFilter::TitleContains(t.to_string()),
            _ => MovieFilter::All,
        }
    }

    /// Case-insensitive substring match on the genre field.
    pub fn by_genre(genre: &str) -> Self {
        MovieFilter::GenreContains(genre.to_string())
    }

    /// SQL predicate over the JSON document column, plus the value to bind
    /// for it. Substring matches are case-insensitive on both sides.
    pub(crate) fn predicate(&self) -> (&'static str, Option<String>) {
        match self {
            MovieFilter::All => ("1", None),
            MovieFilter::TitleContains(term) => (
                "instr(lower(coalesce(json_extract(doc, '$.title'), '')), ?) > 0",
                Some(term.to_lowercase()),
            ),
            MovieFilter::GenreContains(genre) => (
                "instr(lower(coalesce(json_extract(doc, '$.genre'), '')), ?) > 0",
                Some(genre.to_lowercase()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_search() {
        assert_eq!(MovieFilter::from_search(None), MovieFilter::All);
        assert_eq!(MovieFilter::from_search(Some("")), MovieFilter::All);
        assert_eq!(
            MovieFilter::from_search(Some("Matrix")),
            MovieFilter::TitleContains("Matrix".to_string())
        );
    }

    #[test]
    fn test_predicate_binds_lowercased() {
        let (clause, bind) = MovieFilter::from_search(Some("MaTrix")).predicate();
        assert!(clause.contains("$.title"));
        assert_eq!(bind.as_deref(), Some("matrix"));

        let (clause, bind) = MovieFilter::by_genre("Sci-Fi").predicate();
        assert!(clause.contains("$.genre"));
        assert_eq!(bind.as_deref(), Some("sci-fi"));
    }

    #[test]
    fn test_match_all_has_no_bind() {
        let (clause, bind) = MovieFilter::All.predicate();
        assert_eq!(clause, "1");
        assert!(bind.is_none());
    }
}
