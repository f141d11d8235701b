mod de;
mod object;
mod ser;
mod value;
mod value_trait;

pub use object::{Iter, Object};
pub use value::LazyValue;
pub use value_trait::{JsonContainerTrait, JsonType, JsonValueTrait};
