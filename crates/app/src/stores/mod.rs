//! Remote stores

pub mod events;
pub mod items;
