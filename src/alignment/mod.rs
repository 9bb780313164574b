pub mod engine;
pub mod noise;
pub mod report;
pub mod tokenization;
