pub mod ping;
pub mod player;
pub mod validation;
