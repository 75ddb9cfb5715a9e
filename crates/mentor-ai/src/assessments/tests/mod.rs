mod bank;
mod common;
mod ranking;
mod scoring;
