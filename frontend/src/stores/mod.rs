pub mod topic;

pub use topic::{SubscriptionId, TopicState, TopicStore};
