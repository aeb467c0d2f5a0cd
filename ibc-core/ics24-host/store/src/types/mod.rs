pub mod height;
pub mod path;
pub mod store;

pub use height::{Height, RawHeight};
pub use path::{Identifier, Path};
pub use store::{BinStore, JsonStore, MainStore, ProtobufStore, State, TypedSet, TypedStore};
