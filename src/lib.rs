pub mod data;
pub mod plot;
pub mod util;
