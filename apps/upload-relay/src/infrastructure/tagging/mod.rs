pub mod cloudinary;
pub mod signature;
pub mod traits;
