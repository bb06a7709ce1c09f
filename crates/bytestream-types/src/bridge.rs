use crate::error::BridgeError;
use crate::logic_long::LogicLong;

/// Contract of the identifier/tag mapping authority.
///
/// The codec only calls these two functions from its logic-long operations
/// and propagates their failures unchanged.
pub trait TagBridge {
    /// Resolve a display tag to its identifier.
    fn tag_to_id(&self, tag: &str) -> Result<LogicLong, BridgeError>;

    /// Render an identifier as its display tag.
    fn id_to_tag(&self, id: LogicLong) -> Result<String, BridgeError>;
}

impl<T: TagBridge + ?Sized> TagBridge for &T {
    fn tag_to_id(&self, tag: &str) -> Result<LogicLong, BridgeError> {
        (**self).tag_to_id(tag)
    }

    fn id_to_tag(&self, id: LogicLong) -> Result<String, BridgeError> {
        (**self).id_to_tag(id)
    }
}

impl<T: TagBridge + ?Sized> TagBridge for Box<T> {
    fn tag_to_id(&self, tag: &str) -> Result<LogicLong, BridgeError> {
        (**self).tag_to_id(tag)
    }

    fn id_to_tag(&self, id: LogicLong) -> Result<String, BridgeError> {
        (**self).id_to_tag(id)
    }
}
