mod upstream_racer;

pub use upstream_racer::UpstreamRacer;
