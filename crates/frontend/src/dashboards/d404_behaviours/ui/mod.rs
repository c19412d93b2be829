mod behaviours;
mod conversions;
mod funnel;
mod tabs;

pub use behaviours::Behaviours;
pub use conversions::ConversionsView;
pub use funnel::FunnelView;
pub use tabs::BehavioursTabs;
