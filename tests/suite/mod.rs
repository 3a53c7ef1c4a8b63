mod config;
mod generator;
mod session;
mod snap;
