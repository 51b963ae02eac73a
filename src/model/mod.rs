pub mod feedback;
pub mod game;
pub mod player;
pub mod report;
pub mod stats;
pub mod team;
