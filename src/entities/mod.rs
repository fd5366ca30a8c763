pub mod game;
pub mod game_word;
pub mod game_word_author;
pub mod user;
pub mod word;
