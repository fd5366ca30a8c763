//! Operations behind the HTTP handlers. Services are stateless and take the connection (or
//! transaction) they run against.

pub mod flag_service;
pub mod game_service;
pub mod link_service;
pub mod random_service;
pub mod search_service;
pub mod user_service;
pub mod vote_service;
pub mod word_service;

pub use flag_service::{FlagNotifier, FlagRecord, FlagService, LogNotifier};
pub use game_service::GameService;
pub use link_service::LinkService;
pub use random_service::RandomService;
pub use search_service::SearchService;
pub use user_service::UserService;
pub use vote_service::VoteService;
pub use word_service::WordService;
