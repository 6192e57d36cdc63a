pub mod contactmodel;
pub mod itemmodel;
pub mod pointsmodel;
pub mod swapmodel;
pub mod usermodel;
