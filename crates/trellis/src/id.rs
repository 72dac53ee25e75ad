use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a node stored in the layout arena.
    pub struct NodeId;
}

new_key_type! {
    /// Handle for a registered event subscription.
    pub struct SubscriptionId;
}
