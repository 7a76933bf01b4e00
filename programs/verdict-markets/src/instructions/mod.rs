pub mod admin;
pub mod claim_winnings;
pub mod create_market;
pub mod initialize_market;
pub mod place_bet;
pub mod price_disputed;
pub mod price_settled;

pub use admin::*;
pub use claim_winnings::*;
pub use create_market::*;
pub use initialize_market::*;
pub use place_bet::*;
pub use price_disputed::*;
pub use price_settled::*;
