pub mod contact;
pub mod slug;
pub mod spam;
pub mod tour;

pub use contact::{ContactError, ContactMessage, ContactSubmission};
pub use slug::slugify;
pub use tour::{TourDate, TourError};
