use crate::*;
pub use random::*;

mod random;

pub trait MemeGenerator {
    fn generate(self, config: FieldConfig) -> MemeLayout;
}
