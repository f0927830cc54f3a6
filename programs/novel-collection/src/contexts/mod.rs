pub mod initialize;
pub mod allowances;
pub mod claim;
pub mod reveal;
pub mod sync_uri;
pub mod admin;
pub mod queries;

pub use initialize::*;
pub use allowances::*;
pub use claim::*;
pub use reveal::*;
pub use sync_uri::*;
pub use admin::*;
pub use queries::*;
