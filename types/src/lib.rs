pub mod chat_role;
pub mod initiator;
pub mod match_result;
pub mod turn_order;

pub use chat_role::ChatRole;
pub use initiator::Initiator;
pub use match_result::MatchResult;
pub use turn_order::TurnOrder;
