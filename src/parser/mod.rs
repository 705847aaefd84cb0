mod jsonc;
mod stylesheet;

pub use jsonc::{parse_jsonc, strip_comments, strip_trailing_commas};
pub use stylesheet::{NodeId, Stylesheet};
