pub mod aggregate;
pub mod breakdown;
pub mod entities;
pub mod error;
pub mod filter;
pub mod normalize;
