pub mod card;
pub mod sm2;

pub use card::Flashcard;
pub use sm2::{FlashcardReviewState, Rating, rate_card};
