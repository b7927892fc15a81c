pub mod area;
pub mod order;
pub mod position;
pub mod table;
pub mod user;

pub use area::*;
pub use order::*;
pub use position::*;
pub use table::*;
pub use user::*;
