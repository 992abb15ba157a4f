pub mod describe;
pub mod inventory;
pub mod media;
pub mod split;
