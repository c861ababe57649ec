mod balancer;

pub use balancer::IBalancer;
