pub mod classify;
pub mod flagged;
pub mod networks;
pub mod scan;
pub mod util;
pub mod workspace;

pub use classify::*;
pub use flagged::*;
pub use networks::*;
pub use scan::*;
pub use util::*;
pub use workspace::*;
