pub mod dcg;
pub mod normal;
mod shared;
