pub mod algo;
pub mod connectivity;
pub mod grid;

pub use algo::bfs::{Bfs, Hops};
pub use connectivity::{find_path, hop_distance, hop_distances_batch};
pub use grid::TraversalGrid;
