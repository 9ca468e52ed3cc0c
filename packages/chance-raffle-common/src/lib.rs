pub mod randomness;
pub mod types;
