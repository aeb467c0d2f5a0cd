/// Serialized proof of a store path, as produced by
/// [`ProvableContext::get_proof`](crate::core::context::ProvableContext::get_proof).
pub type Proof = Vec<u8>;
