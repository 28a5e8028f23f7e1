pub mod card;
pub mod deck;
