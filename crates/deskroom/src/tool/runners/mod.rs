pub mod window_runner;
