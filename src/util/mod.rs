mod geo;

pub use geo::distance_wgs84;

#[cfg(test)]
mod tests;
