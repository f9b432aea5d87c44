//! Text analysis: turning raw text into index tokens.

pub mod normalizer;

pub use normalizer::Normalizer;
