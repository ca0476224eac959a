use schemars::JsonSchema;
use std::fmt::Debug;

use serde::Serialize;
use utility::id::{HasId, Id};

pub mod cafe;
pub mod location;
pub mod search;

pub trait ExampleData {
    fn example_data() -> Self;
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithDistance<T> {
    pub distance_meters: f64,
    #[serde(flatten)]
    pub content: T,
}

impl<T> WithDistance<T> {
    pub fn new(distance_meters: f64, content: T) -> Self {
        Self {
            distance_meters,
            content,
        }
    }

    pub fn with_id(self, id: Id<T>) -> WithDistance<WithId<T>>
    where
        T: HasId,
        T::IdType: Debug + Clone + Serialize,
    {
        WithDistance::new(self.distance_meters, WithId::new(id, self.content))
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub id: Id<V>,
    #[serde(flatten)]
    pub content: V,
}

impl<V> WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub fn new(id: Id<V>, content: V) -> Self {
        Self { id, content }
    }
}
