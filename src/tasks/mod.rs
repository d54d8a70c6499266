pub mod logic_runner;
