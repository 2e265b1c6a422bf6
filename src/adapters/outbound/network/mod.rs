/// Network adapters for the dependency-tracking server
mod dependency_track_client;

pub use dependency_track_client::DependencyTrackClient;
