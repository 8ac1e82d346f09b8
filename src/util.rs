pub mod httpclient;
pub mod object;
pub mod pairs;
