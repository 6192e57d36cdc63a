pub mod admindb;
pub mod contactdb;
pub mod db;
pub mod itemdb;
pub mod pointsdb;
pub mod swapdb;
pub mod userdb;
