//! Text canonicalization shared by lookup building and scanning

mod money;
mod normalize;

pub use money::{is_money, parse_money, MONEY_PATTERN};
pub use normalize::{clean_label, detach_words, normalize, strip_prefix};
