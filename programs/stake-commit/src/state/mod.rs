pub mod claim_record;
pub mod config;
pub mod lock;
pub mod pool;
pub mod price_feed;

pub use claim_record::*;
pub use config::*;
pub use lock::*;
pub use pool::*;
pub use price_feed::*;
