use serde::{Deserialize, Serialize};

/// A single entry in the book catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier, unique within the collection
    pub id: u64,
    /// Title of the book (3-30 characters)
    pub title: String,
    /// Author of the book (3-30 characters)
    pub author: String,
    /// Year of publication (at most the current calendar year)
    pub year: i32,
}

/// Request payload for creating a book, and for replacing one via update.
///
/// The id is never client-supplied: the store assigns it on create and
/// preserves it on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub year: i32,
}
