mod social_graph;

pub use social_graph::SocialGraphService;
