mod commands;
mod doctor;

pub use commands::run;
