pub mod error;
pub mod object;
pub mod pairs;
pub mod qingstor;
