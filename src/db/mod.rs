pub mod events;
pub mod exchanges;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod ordering;
pub mod pool;
pub mod shifts;
pub mod stats;
pub mod users;
