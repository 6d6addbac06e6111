mod common;
mod decision;
mod scoring;
