//! A Module with some utilities for working with NodeIds

use super::NodeId;

/// A specialized [`HashMap`](std::collections::HashMap) for NodeIds with a faster Hasher
pub type NodeIdMap<V> = std::collections::HashMap<NodeId, V, BuildNodeIdHasher>;
/// A specialized [`HashSet`](std::collections::HashSet) for NodeIds with a faster Hasher
pub type NodeIdSet = std::collections::HashSet<NodeId, BuildNodeIdHasher>;

/// A [`BuildHasher`](std::hash::BuildHasher) specialized on NodeIds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildNodeIdHasher;

/// A [`Hasher`](std::hash::Hasher) specialized on NodeIds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeIdHasher(u64);

impl std::hash::BuildHasher for BuildNodeIdHasher {
	type Hasher = NodeIdHasher;
	fn build_hasher(&self) -> NodeIdHasher {
		NodeIdHasher(0)
	}
}
impl std::hash::Hasher for NodeIdHasher {
	/// panics, since only NodeIds are supposed to be used
	fn write(&mut self, _: &[u8]) {
		unreachable!("This Hasher only works with NodeIds")
	}
	/// Writes a single NodeId into this hasher.
	fn write_usize(&mut self, id: NodeId) {
		self.0 = id as u64
	}
	fn finish(&self) -> u64 {
		self.0
	}
}

/// create a new [`NodeIdMap`] by calling the [`with_hasher`](std::collections::HashMap::with_hasher) Function
pub fn node_id_map<V>() -> NodeIdMap<V> {
	NodeIdMap::with_hasher(BuildNodeIdHasher)
}
/// create a new [`NodeIdSet`] by calling the [`with_hasher`](std::collections::HashSet::with_hasher) Function
pub fn node_id_set() -> NodeIdSet {
	NodeIdSet::with_hasher(BuildNodeIdHasher)
}

/// create a new [`NodeIdMap`] by calling the [`with_capacity_and_hasher`](std::collections::HashMap::with_capacity_and_hasher) Function
pub fn node_id_map_with_cap<V>(capacity: usize) -> NodeIdMap<V> {
	NodeIdMap::with_capacity_and_hasher(capacity, BuildNodeIdHasher)
}
/// create a new [`NodeIdSet`] by calling the [`with_capacity_and_hasher`](std::collections::HashSet::with_capacity_and_hasher) Function
pub fn node_id_set_with_cap(capacity: usize) -> NodeIdSet {
	NodeIdSet::with_capacity_and_hasher(capacity, BuildNodeIdHasher)
}
