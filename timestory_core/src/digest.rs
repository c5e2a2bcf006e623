use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use crate::data::EventRecord;

pub type DigestOutput = u64;

pub trait Digestible {
    fn digest(&self) -> DigestOutput;
}

impl Digestible for EventRecord {
    fn digest(&self) -> DigestOutput {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl<D: Digestible + ?Sized> Digestible for &D {
    fn digest(&self) -> DigestOutput {
        (**self).digest()
    }
}

// order-sensitive, so reordering the same events changes the digest
impl<D: Digestible> Digestible for [D] {
    fn digest(&self) -> DigestOutput {
        let mut hasher = DefaultHasher::new();
        self.len().hash(&mut hasher);
        for item in self {
            item.digest().hash(&mut hasher);
        }
        hasher.finish()
    }
}
