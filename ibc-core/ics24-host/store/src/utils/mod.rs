pub(crate) mod codec;
pub(crate) mod sync;

pub use codec::{BinCodec, Codec, JsonCodec, NullCodec, ProtobufCodec};
pub use sync::{Async, SharedRw, SharedRwExt};
