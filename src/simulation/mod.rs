pub mod vector;
pub mod params;
pub mod particle;
pub mod forces;
pub mod grid;
pub mod boundary;
pub mod domain;
pub mod scenario;
