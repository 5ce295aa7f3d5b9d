use crate::concepts::packet::Advertisement;
use crate::feedback::CodecError;
use crate::framework::{AdvertisementCodec, RoutingSystem};

/// Encodes advertisements as JSON, as a list of `(destination, route)` pairs
#[derive(Default, Clone, Copy, Debug)]
pub struct JsonCodec;

impl<T: RoutingSystem + ?Sized> AdvertisementCodec<T> for JsonCodec {
    fn encode(&self, advertisement: &Advertisement<T>) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(advertisement).map_err(CodecError::Encode)
    }

    fn decode(&self, payload: &[u8]) -> Result<Advertisement<T>, CodecError> {
        serde_json::from_slice(payload).map_err(CodecError::Decode)
    }
}
