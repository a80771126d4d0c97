//! Integration tests for the LearnSphere course library

mod classification;
mod cli;
mod library_views;
mod listing;
mod support;
