use chrono::{Datelike, Utc};
use shared::{Book, CreateBookRequest};
use tracing::{info, warn};

use crate::store::BookStore;

/// Failure kinds surfaced by the book service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookError {
    #[error("No book with id {0} was found")]
    NotFound(u64),
    #[error("{0}")]
    Validation(String),
}

/// Length bounds for a required text field of the candidate record
struct TextRule {
    field: &'static str,
    value: fn(&CreateBookRequest) -> &str,
    min_len: usize,
    max_len: usize,
}

/// Rules are evaluated in declaration order; the first violation is the one
/// reported to the caller.
const TEXT_RULES: [TextRule; 2] = [
    TextRule {
        field: "title",
        value: |candidate| candidate.title.as_str(),
        min_len: 3,
        max_len: 30,
    },
    TextRule {
        field: "author",
        value: |candidate| candidate.author.as_str(),
        min_len: 3,
        max_len: 30,
    },
];

/// Check a candidate record against the field rules: title and author must
/// be 3-30 characters, year must not be past the current calendar year.
fn validate_book(candidate: &CreateBookRequest) -> Result<(), BookError> {
    for rule in &TEXT_RULES {
        let len = (rule.value)(candidate).chars().count();
        if len < rule.min_len {
            return Err(BookError::Validation(format!(
                "\"{}\" length must be at least {} characters long",
                rule.field, rule.min_len
            )));
        }
        if len > rule.max_len {
            return Err(BookError::Validation(format!(
                "\"{}\" length must be at most {} characters long",
                rule.field, rule.max_len
            )));
        }
    }

    let year_limit = Utc::now().year() + 1;
    if candidate.year >= year_limit {
        return Err(BookError::Validation(format!(
            "\"year\" must be less than {}",
            year_limit
        )));
    }

    Ok(())
}

/// Service exposing the catalog operations to the REST layer.
///
/// All access to the collection goes through here: candidates are validated
/// before any mutation reaches the store.
#[derive(Clone)]
pub struct BookService {
    store: BookStore,
}

impl BookService {
    pub fn new(store: BookStore) -> Self {
        Self { store }
    }

    /// List all books in insertion order
    pub fn list_books(&self) -> Vec<Book> {
        let books = self.store.list();
        info!("Listing {} books", books.len());
        books
    }

    /// Get a book by id
    pub fn get_book(&self, id: u64) -> Result<Book, BookError> {
        info!("Getting book: {}", id);

        self.store.get(id).ok_or_else(|| {
            warn!("Book not found: {}", id);
            BookError::NotFound(id)
        })
    }

    /// Validate a candidate and append it with a freshly assigned id
    pub fn create_book(&self, candidate: CreateBookRequest) -> Result<Book, BookError> {
        info!(
            "Creating book: title={}, author={}, year={}",
            candidate.title, candidate.author, candidate.year
        );

        validate_book(&candidate)?;

        let book = self.store.insert(candidate);
        info!("Created book: {} with id {}", book.title, book.id);

        Ok(book)
    }

    /// Replace the book with the given id, keeping the id.
    ///
    /// Absent ids are reported before the candidate is validated, so an
    /// invalid payload against an unknown id is still a NotFound.
    pub fn update_book(&self, id: u64, candidate: CreateBookRequest) -> Result<Book, BookError> {
        info!("Updating book: {}", id);

        if self.store.get(id).is_none() {
            warn!("Book not found: {}", id);
            return Err(BookError::NotFound(id));
        }

        validate_book(&candidate)?;

        let book = self
            .store
            .replace(id, candidate)
            .ok_or(BookError::NotFound(id))?;
        info!("Updated book: {} with id {}", book.title, book.id);

        Ok(book)
    }

    /// Delete a book by id, returning the removed record
    pub fn delete_book(&self, id: u64) -> Result<Book, BookError> {
        info!("Deleting book: {}", id);

        let book = self.store.remove(id).ok_or_else(|| {
            warn!("Book not found: {}", id);
            BookError::NotFound(id)
        })?;
        info!("Deleted book: {} with id {}", book.title, book.id);

        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test() -> BookService {
        BookService::new(BookStore::new())
    }

    fn candidate(title: &str, author: &str, year: i32) -> CreateBookRequest {
        CreateBookRequest {
            title: title.to_string(),
            author: author.to_string(),
            year,
        }
    }

    fn assert_validation_names_field(result: Result<Book, BookError>, field: &str) {
        match result {
            Err(BookError::Validation(message)) => {
                assert!(
                    message.contains(&format!("\"{}\"", field)),
                    "message should name {}: {}",
                    field,
                    message
                );
            }
            other => panic!("expected validation error for {}, got {:?}", field, other),
        }
    }

    #[test]
    fn test_create_then_get_roundtrip() {
        let service = setup_test();

        let created = service
            .create_book(candidate("The Hobbit", "J.R.R. Tolkien", 1937))
            .unwrap();
        let fetched = service.get_book(created.id).unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "The Hobbit");
        assert_eq!(fetched.author, "J.R.R. Tolkien");
        assert_eq!(fetched.year, 1937);
    }

    #[test]
    fn test_list_length_tracks_mutations() {
        let service = setup_test();

        let first = service
            .create_book(candidate("The Hobbit", "J.R.R. Tolkien", 1937))
            .unwrap();
        assert_eq!(service.list_books().len(), 1);

        service
            .create_book(candidate("Dune", "Frank Herbert", 1965))
            .unwrap();
        assert_eq!(service.list_books().len(), 2);

        service
            .update_book(first.id, candidate("The Hobbit", "Tolkien", 1937))
            .unwrap();
        assert_eq!(service.list_books().len(), 2);

        service.delete_book(first.id).unwrap();
        assert_eq!(service.list_books().len(), 1);
    }

    #[test]
    fn test_unknown_id_is_not_found_everywhere() {
        let service = setup_test();

        assert_eq!(service.get_book(7), Err(BookError::NotFound(7)));
        assert_eq!(
            service.update_book(7, candidate("Dune", "Frank Herbert", 1965)),
            Err(BookError::NotFound(7))
        );
        assert_eq!(service.delete_book(7), Err(BookError::NotFound(7)));
    }

    #[test]
    fn test_update_on_unknown_id_wins_over_invalid_payload() {
        let service = setup_test();

        // Title too short AND id absent: the absent id is reported
        assert_eq!(
            service.update_book(7, candidate("ab", "Frank Herbert", 1965)),
            Err(BookError::NotFound(7))
        );
    }

    #[test]
    fn test_title_too_short_is_rejected() {
        let service = setup_test();

        let result = service.create_book(candidate("ab", "Frank Herbert", 1965));
        assert_validation_names_field(result, "title");
    }

    #[test]
    fn test_author_too_long_is_rejected() {
        let service = setup_test();

        let result = service.create_book(candidate("Dune", &"a".repeat(31), 1965));
        assert_validation_names_field(result, "author");
    }

    #[test]
    fn test_future_year_is_rejected() {
        let service = setup_test();

        let result = service.create_book(candidate("Dune", "Frank Herbert", Utc::now().year() + 2));
        assert_validation_names_field(result, "year");
    }

    #[test]
    fn test_next_year_is_already_too_late() {
        let service = setup_test();

        let result = service.create_book(candidate("Dune", "Frank Herbert", Utc::now().year() + 1));
        assert_validation_names_field(result, "year");
    }

    #[test]
    fn test_boundary_values_are_accepted() {
        let service = setup_test();

        // 3-character and 30-character fields, current-year publication
        let title = "abc";
        let author = "b".repeat(30);
        let book = service
            .create_book(candidate(title, &author, Utc::now().year()))
            .unwrap();

        assert_eq!(book.title, title);
        assert_eq!(book.author, author);
    }

    #[test]
    fn test_first_failing_rule_is_reported() {
        let service = setup_test();

        // Title and author both invalid: title is declared first
        let result = service.create_book(candidate("ab", "x", 1965));
        assert_validation_names_field(result, "title");
    }

    #[test]
    fn test_update_preserves_id() {
        let service = setup_test();

        let created = service
            .create_book(candidate("The Hobbit", "J.R.R. Tolkien", 1937))
            .unwrap();
        let updated = service
            .update_book(created.id, candidate("Dune", "Frank Herbert", 1965))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Dune");

        let fetched = service.get_book(created.id).unwrap();
        assert_eq!(fetched, updated);
    }

    #[test]
    fn test_invalid_update_leaves_record_untouched() {
        let service = setup_test();

        let created = service
            .create_book(candidate("The Hobbit", "J.R.R. Tolkien", 1937))
            .unwrap();
        let result = service.update_book(created.id, candidate("ab", "Frank Herbert", 1965));

        assert_validation_names_field(result, "title");
        assert_eq!(service.get_book(created.id).unwrap(), created);
    }
}
