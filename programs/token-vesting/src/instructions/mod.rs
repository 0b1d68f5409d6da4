pub mod initialize;
pub mod set_issuer;
pub mod add_grant;
pub mod release_single;
pub mod release_self;
pub mod release_all;
pub mod release_by_participant;
pub mod release_role_amount;
pub mod revoke_grant;
pub mod revoke_batch;
pub mod emit_grant_quote;
pub mod emit_vesting_stats;

pub use initialize::*;
pub use set_issuer::*;
pub use add_grant::*;
pub use release_single::*;
pub use release_self::*;
pub use release_all::*;
pub use release_by_participant::*;
pub use release_role_amount::*;
pub use revoke_grant::*;
pub use revoke_batch::*;
pub use emit_grant_quote::*;
pub use emit_vesting_stats::*;
