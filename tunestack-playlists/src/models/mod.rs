/// Database models for the Playlist Service

pub mod playlist;
