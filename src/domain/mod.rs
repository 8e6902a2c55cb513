pub mod asset;
pub mod errors;
pub mod loan;
pub mod messaging;
pub mod user;

pub use asset::Asset;
pub use errors::DomainError;
pub use loan::{Loan, LoanStatus};
pub use messaging::{Conversation, ConversationStatus, Message, MessageKind};
pub use user::User;
