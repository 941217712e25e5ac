pub mod agires;
pub mod agigfx;
