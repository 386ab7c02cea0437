pub mod registry;
pub mod rewards;
