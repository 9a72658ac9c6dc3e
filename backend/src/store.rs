use std::sync::{Arc, Mutex, MutexGuard};

use shared::{Book, CreateBookRequest};

/// BookStore owns the in-memory book collection.
///
/// The handle is cheap to clone and every clone shares the same collection.
/// Each operation takes the lock once and performs the whole
/// read-modify-write under it, so id assignment and index lookups cannot
/// interleave across concurrent requests.
#[derive(Clone)]
pub struct BookStore {
    books: Arc<Mutex<Vec<Book>>>,
}

impl BookStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            books: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a store preloaded with the catalog the server ships with
    pub fn seeded() -> Self {
        let books = vec![
            Book {
                id: 1,
                title: "Mastering Ubuntu Server".to_string(),
                author: "John Doe".to_string(),
                year: 2013,
            },
            Book {
                id: 2,
                title: "Legal update".to_string(),
                author: "No name".to_string(),
                year: 2015,
            },
            Book {
                id: 3,
                title: "Pejsek a Kocicka".to_string(),
                author: "Jan Novak".to_string(),
                year: 2000,
            },
        ];

        Self {
            books: Arc::new(Mutex::new(books)),
        }
    }

    fn books(&self) -> MutexGuard<'_, Vec<Book>> {
        self.books.lock().expect("book collection lock poisoned")
    }

    /// All books, in insertion order
    pub fn list(&self) -> Vec<Book> {
        self.books().clone()
    }

    /// Look up a single book by id
    pub fn get(&self, id: u64) -> Option<Book> {
        self.books().iter().find(|book| book.id == id).cloned()
    }

    /// Append a new book, assigning it the next free id.
    ///
    /// The caller is expected to have validated the candidate already.
    pub fn insert(&self, candidate: CreateBookRequest) -> Book {
        let mut books = self.books();
        let book = Book {
            id: next_id(&books),
            title: candidate.title,
            author: candidate.author,
            year: candidate.year,
        };
        books.push(book.clone());
        book
    }

    /// Replace the book with the given id in place, keeping its id and its
    /// position in the collection. Returns the new record, or `None` when
    /// no book has that id.
    pub fn replace(&self, id: u64, candidate: CreateBookRequest) -> Option<Book> {
        let mut books = self.books();
        let index = books.iter().position(|book| book.id == id)?;
        let book = Book {
            id,
            title: candidate.title,
            author: candidate.author,
            year: candidate.year,
        };
        books[index] = book.clone();
        Some(book)
    }

    /// Remove the book with the given id, preserving the relative order of
    /// the remaining books. Returns the removed record, or `None` when no
    /// book has that id.
    pub fn remove(&self, id: u64) -> Option<Book> {
        let mut books = self.books();
        let index = books.iter().position(|book| book.id == id)?;
        Some(books.remove(index))
    }
}

/// Next id is one past the highest id currently in the collection, or 1 for
/// an empty collection. Deleting the highest-id book therefore frees its id
/// for the next insert.
fn next_id(books: &[Book]) -> u64 {
    books.iter().map(|book| book.id).max().map_or(1, |max| max + 1)
}
