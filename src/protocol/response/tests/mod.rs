//! Test module for response classification

mod listing;
