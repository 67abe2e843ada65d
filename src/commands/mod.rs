pub mod audit;
pub mod browse;
pub mod list;
pub mod split;
pub mod tags;
