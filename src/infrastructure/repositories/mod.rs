mod asset_repository;
mod conversation_repository;
mod loan_repository;
mod traits;
mod user_repository;

pub use asset_repository::AssetRepositoryImpl;
pub use conversation_repository::ConversationRepositoryImpl;
pub use loan_repository::LoanRepositoryImpl;
pub use traits::{
    AssetRepository, ConversationRepository, ConversationWithUnread, LoanRepository,
    UserRepository,
};
pub use user_repository::UserRepositoryImpl;
