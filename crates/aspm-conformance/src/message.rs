//! Object-safe view over the "generic structured message" capability.

use std::any::Any;
use std::fmt;

/// Encode/decode/clone/reset primitives of one registered message instance.
///
/// Every `prost` message is adapted automatically by the registry builder;
/// implement this by hand only for message types that do not go through prost.
pub trait DynMessage: fmt::Debug + Send + Sync + 'static {
    fn encode_to_vec(&self) -> Result<Vec<u8>, prost::EncodeError>;

    /// Decode `buf` into a freshly constructed zero instance of the same type.
    fn decode_fresh(&self, buf: &[u8]) -> Result<Box<dyn DynMessage>, prost::DecodeError>;

    /// A freshly constructed zero instance of the same type.
    fn new_zero(&self) -> Box<dyn DynMessage>;

    fn clone_boxed(&self) -> Box<dyn DynMessage>;

    /// Clear every field back to its zero value, in place.
    fn reset(&mut self);

    /// Structural equality; values of different concrete types are never equal.
    fn equals(&self, other: &dyn DynMessage) -> bool;

    fn as_any(&self) -> &dyn Any;

    /// Address of the storage backing this value, used to tell a clone apart
    /// from its original. Zero-sized values have no distinct storage and
    /// report `None`.
    fn storage(&self) -> Option<*const ()> {
        if std::mem::size_of_val(self) == 0 {
            None
        } else {
            Some((self as *const Self).cast::<()>())
        }
    }
}

/// Adapts a prost message to [`DynMessage`].
#[derive(Clone)]
pub(crate) struct ProstCell<T>(pub(crate) T);

impl<T: fmt::Debug> fmt::Debug for ProstCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> DynMessage for ProstCell<T>
where
    T: prost::Message + Default + Clone + PartialEq + 'static,
{
    fn encode_to_vec(&self) -> Result<Vec<u8>, prost::EncodeError> {
        let mut buf = Vec::with_capacity(self.0.encoded_len());
        self.0.encode(&mut buf)?;
        Ok(buf)
    }

    fn decode_fresh(&self, buf: &[u8]) -> Result<Box<dyn DynMessage>, prost::DecodeError> {
        let decoded = T::decode(buf)?;
        Ok(Box::new(ProstCell(decoded)))
    }

    fn new_zero(&self) -> Box<dyn DynMessage> {
        Box::new(ProstCell(T::default()))
    }

    fn clone_boxed(&self) -> Box<dyn DynMessage> {
        Box::new(self.clone())
    }

    fn reset(&mut self) {
        self.0.clear();
    }

    fn equals(&self, other: &dyn DynMessage) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self.0 == other.0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, prost::Message)]
    struct Sample {
        #[prost(string, tag = "1")]
        name: String,
        #[prost(int64, tag = "2")]
        count: i64,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    struct Empty {}

    #[derive(Clone, PartialEq, prost::Message)]
    struct Other {
        #[prost(string, tag = "1")]
        name: String,
    }

    fn sample() -> ProstCell<Sample> {
        ProstCell(Sample {
            name: "scanner".into(),
            count: 7,
        })
    }

    #[test]
    fn test_encode_decode_fresh() {
        let msg = sample();
        let bytes = msg.encode_to_vec().unwrap();
        let decoded = msg.decode_fresh(&bytes).unwrap();
        assert!(msg.equals(decoded.as_ref()));
    }

    #[test]
    fn test_reset_matches_zero() {
        let mut msg = sample();
        assert!(!msg.equals(msg.new_zero().as_ref()));
        msg.reset();
        assert!(msg.equals(msg.new_zero().as_ref()));
    }

    #[test]
    fn test_different_types_never_equal() {
        let a = ProstCell(Other {
            name: "scanner".into(),
        });
        let b = ProstCell(Sample {
            name: "scanner".into(),
            count: 0,
        });
        assert!(!a.equals(&b));
    }

    #[test]
    fn test_clone_has_own_storage() {
        let msg: Box<dyn DynMessage> = Box::new(sample());
        let cloned = msg.clone_boxed();
        assert!(msg.equals(cloned.as_ref()));
        assert_ne!(msg.storage(), cloned.storage());
    }

    #[test]
    fn test_zero_sized_has_no_storage() {
        let msg = ProstCell(Empty {});
        assert!(msg.storage().is_none());
        assert!(msg.encode_to_vec().unwrap().is_empty());
    }
}
