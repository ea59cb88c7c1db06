//! Sample event types.

/// An event carrying an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ping {
    /// Identifier echoed back to listeners.
    pub id: u32,
}

/// An event with no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pong;

/// A counter event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tick(pub u64);

/// An event with an owned payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Message {
    /// Topic the message was sent on.
    pub topic: String,
    /// Message body.
    pub body: String,
}

impl Message {
    /// Create a message.
    #[must_use]
    pub fn new(topic: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            body: body.into(),
        }
    }
}
