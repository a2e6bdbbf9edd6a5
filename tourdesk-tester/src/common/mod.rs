pub mod scenario;
pub mod util;

pub use util::{parse_today, split_csv};
