pub mod getuser;
pub mod listdir;
